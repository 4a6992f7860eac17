use anyhow::Context;
use invite_editor_shared::{EventFields, GuestContext, PreviewDefaults, render_for_guest};
use tracing::{debug, info, instrument};

use crate::catalog::TemplateCatalog;
use crate::cli::{Command, PreviewArgs, RenderArgs};
use crate::config::Config;
use crate::render::Renderer;

#[instrument(skip(catalog, cfg, renderer, command))]
pub fn dispatch(
    catalog: &TemplateCatalog,
    cfg: &Config,
    renderer: &mut Renderer,
    command: Command,
) -> anyhow::Result<()> {
    debug!(?command, "dispatching command");

    match command {
        Command::Templates => cmd_templates(catalog, renderer),
        Command::Preview(args) => cmd_preview(catalog, cfg, renderer, &args),
        Command::Render(args) => cmd_render(catalog, renderer, &args),
    }
}

/// Edit-mode render: empty fields fall back to placeholder text and guest
/// tokens get fixed stand-ins.
#[instrument(skip(catalog, defaults, fields))]
pub fn render_preview(
    catalog: &TemplateCatalog,
    defaults: &PreviewDefaults,
    template: &str,
    fields: &EventFields,
) -> anyhow::Result<String> {
    let markup = catalog.load(template)?;
    Ok(defaults.render(&markup, fields))
}

#[instrument(skip(catalog, fields, guest))]
pub fn render_guest(
    catalog: &TemplateCatalog,
    template: &str,
    fields: &EventFields,
    guest: &GuestContext,
) -> anyhow::Result<String> {
    let markup = catalog.load(template)?;
    Ok(render_for_guest(&markup, fields, guest))
}

fn cmd_templates(catalog: &TemplateCatalog, renderer: &mut Renderer) -> anyhow::Result<()> {
    let choices = catalog.list()?;
    info!(count = choices.len(), dir = %catalog.dir().display(), "listing templates");
    renderer.print_template_table(&choices)
}

fn cmd_preview(
    catalog: &TemplateCatalog,
    cfg: &Config,
    renderer: &mut Renderer,
    args: &PreviewArgs,
) -> anyhow::Result<()> {
    let fields = args.fields.resolve()?;
    let html = render_preview(catalog, &cfg.preview, &args.template, &fields)
        .with_context(|| format!("failed to preview template {}", args.template))?;
    renderer.emit_markup(&html, args.output.as_deref())
}

fn cmd_render(
    catalog: &TemplateCatalog,
    renderer: &mut Renderer,
    args: &RenderArgs,
) -> anyhow::Result<()> {
    let fields = args.fields.resolve()?;
    let guest = args.guest_context();
    let html = render_guest(catalog, &args.template, &fields, &guest)
        .with_context(|| format!("failed to render template {} for {}", args.template, guest.guest_name))?;
    renderer.emit_markup(&html, args.output.as_deref())
}
