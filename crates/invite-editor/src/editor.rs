use std::cell::RefCell;

use invite_editor_shared::Section;
use invite_editor_shared::dom::{
  REFRESH_PREVIEW_GLOBAL,
  SELECT_ALL_GLOBAL,
  SELECT_BY_TAG_GLOBAL
};
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::config::load_editor_config;
use crate::contacts::{
  ContactElements,
  ContactPanel
};
use crate::dom::document;
use crate::error::{
  EditorError,
  Result
};
use crate::preview::{
  PreviewController,
  PreviewElements
};

thread_local! {
  static MOUNTED: RefCell<Option<Editor>> =
    const { RefCell::new(None) };
}

/// The editor screen for one page session.
///
/// The preview and the contact panel are mounted
/// independently; a page may carry either one.
pub struct Editor {
  preview:  Option<PreviewController>,
  contacts: Option<ContactPanel>
}

impl Editor {
  #[tracing::instrument(skip_all)]
  pub fn mount() -> Result<Self> {
    let config = load_editor_config();
    let document = document()?;

    let preview = Section::from_resolved(
      PreviewElements::resolve(&document)
    );
    let contacts = Section::from_resolved(
      ContactElements::resolve(&document)
    );

    let preview = preview.map(|elements| {
      PreviewController::mount(
        document.clone(),
        elements,
        config.preview
      )
    });
    let contacts =
      contacts.map(ContactPanel::mount);

    Ok(Self {
      preview:  settle("template preview", preview),
      contacts: settle("contact panel", contacts)
    })
  }
}

fn settle<T>(
  name: &str,
  section: Section<T, EditorError>
) -> Option<T> {
  match section {
    | Section::Ready(mounted) => Some(mounted),
    | Section::Absent => {
      tracing::info!(
        section = name,
        "page has no markup for section"
      );
      None
    }
    | Section::Broken(error) => {
      tracing::error!(
        section = name,
        %error,
        "section markup is incomplete; not \
         wired"
      );
      None
    }
  }
}

/// Keeps the editor alive for the rest of the page
/// session and reachable from page script.
pub fn install(editor: Editor) {
  MOUNTED.with(|slot| {
    *slot.borrow_mut() = Some(editor);
  });
  if let Err(error) = expose_globals() {
    tracing::warn!(
      %error,
      "page script helpers unavailable"
    );
  }
}

/// Puts `selectByTag`, `selectAll` and
/// `refreshPreview` on `window` so inline `onclick`
/// handlers can call them.
fn expose_globals() -> Result<()> {
  let window =
    web_sys::window().ok_or(EditorError::NoWindow)?;

  let by_tag =
    Closure::<dyn Fn(String) -> u32>::new(
      |tag: String| select_by_tag(&tag)
    );
  let all =
    Closure::<dyn Fn(bool) -> u32>::new(
      select_all
    );
  let refresh =
    Closure::<dyn Fn()>::new(refresh_preview);

  for (name, function) in [
    (SELECT_BY_TAG_GLOBAL, by_tag.as_ref()),
    (SELECT_ALL_GLOBAL, all.as_ref()),
    (REFRESH_PREVIEW_GLOBAL, refresh.as_ref())
  ] {
    Reflect::set(
      &window,
      &JsValue::from_str(name),
      function
    )
    .map_err(|value| {
      EditorError::js(
        "install page helper",
        value
      )
    })?;
  }

  by_tag.forget();
  all.forget();
  refresh.forget();
  Ok(())
}

fn with_editor<R>(
  f: impl FnOnce(&Editor) -> R
) -> Option<R> {
  let result = MOUNTED
    .with(|slot| slot.borrow().as_ref().map(f));
  if result.is_none() {
    tracing::warn!(
      "invitation editor is not mounted"
    );
  }
  result
}

pub fn select_by_tag(tag: &str) -> u32 {
  with_editor(|editor| {
    editor
      .contacts
      .as_ref()
      .map_or(0, |panel| {
        panel.select_by_tag(tag)
      })
  })
  .unwrap_or(0) as u32
}

pub fn select_all(checked: bool) -> u32 {
  with_editor(|editor| {
    editor
      .contacts
      .as_ref()
      .map_or(0, |panel| {
        panel.select_all(checked)
      })
  })
  .unwrap_or(0) as u32
}

pub fn refresh_preview() {
  with_editor(|editor| {
    if let Some(preview) = &editor.preview {
      preview.refresh();
    }
  });
}
