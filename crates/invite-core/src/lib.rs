pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::info;

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting invite-preview"
  );

  let cfg = config::Config::load(
    cli.config.as_deref()
  )?;

  let templates_dir =
    config::resolve_templates_dir(
      &cfg,
      cli.templates.as_deref()
    )
    .context(
      "failed to resolve template \
       directory"
    )?;
  let catalog =
    catalog::TemplateCatalog::open(
      &templates_dir
    );

  let mut renderer =
    render::Renderer::new(&cfg);

  commands::dispatch(
    &catalog,
    &cfg,
    &mut renderer,
    cli.command
  )?;

  info!("done");
  Ok(())
}
