mod api;
mod config;
mod contacts;
mod dom;
mod editor;
mod error;
mod preview;

use gloo::console::log;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting invitation editor frontend"
  );

  match editor::Editor::mount() {
    | Ok(mounted) => editor::install(mounted),
    | Err(error) => {
      tracing::error!(
        %error,
        "invitation editor could not \
         reach the page"
      );
    }
  }
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
