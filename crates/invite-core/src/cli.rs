use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{ArgAction, Args, Parser, Subcommand};
use invite_editor_shared::{EventFields, FormField, GuestContext};
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

/// One `--field KEY=VALUE` override.
#[derive(Debug, Clone)]
pub struct FieldValue {
    pub field: FormField,
    pub value: String,
}

impl std::str::FromStr for FieldValue {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        let key = k.trim();
        let field = FormField::from_key(key).ok_or_else(|| {
            anyhow!("unknown field {key:?}; expected one of title, host, date, time, location, message")
        })?;
        Ok(Self {
            field,
            value: v.to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "invite-preview",
    version,
    about = "Render invitation templates the way the event editor previews them"
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long = "templates", global = true)]
    pub templates: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List available templates.
    Templates,
    /// Render a template with editor fallbacks and placeholder guest data.
    Preview(PreviewArgs),
    /// Render a template for one guest, as sent.
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FieldArgs {
    /// JSON object with title, host, date, time, location and message.
    #[arg(long = "values")]
    pub values: Option<PathBuf>,

    #[arg(
        long = "field",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<FieldValue>()),
        action = ArgAction::Append
    )]
    pub fields: Vec<FieldValue>,
}

impl FieldArgs {
    /// Values from `--values`, then each `--field` on top.
    pub fn resolve(&self) -> anyhow::Result<EventFields> {
        let mut fields = match &self.values {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str::<EventFields>(&raw)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => EventFields::default(),
        };

        for over in &self.fields {
            debug!(field = over.field.element_id(), value = %over.value, "applying field override");
            fields.set(over.field, over.value.clone());
        }

        Ok(fields)
    }
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    pub template: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    pub template: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    #[arg(long = "guest")]
    pub guest: String,

    #[arg(long = "rsvp-url")]
    pub rsvp_url: String,

    /// The event has a photo.
    #[arg(long = "photo")]
    pub photo: bool,

    /// Photo address for web display; defaults to the inline mail attachment.
    #[arg(long = "photo-url", requires = "photo")]
    pub photo_url: Option<String>,

    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    pub fn guest_context(&self) -> GuestContext {
        GuestContext {
            guest_name: self.guest.clone(),
            rsvp_url: self.rsvp_url.clone(),
            has_photo: self.photo,
            photo_url: self.photo_url.clone(),
        }
    }
}

/// Log level used when `RUST_LOG` is unset. `-q` wins over `-v`.
fn default_log_level(verbose: u8, quiet: u8) -> Level {
    match (quiet, verbose) {
        (2.., _) => Level::ERROR,
        (1, _) | (0, 0) => Level::WARN,
        (0, 1) => Level::INFO,
        (0, 2) => Level::DEBUG,
        (0, _) => Level::TRACE,
    }
}

/// Installs the stderr subscriber. A subscriber that is already set is kept.
pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let level = default_log_level(verbose, quiet);
    let env_filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {}: {directives}", EnvFilter::DEFAULT_ENV))?,
        _ => EnvFilter::new(level.as_str()),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .is_ok();

    debug!(%level, installed, "tracing ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_overrides() {
        let cli = GlobalCli::parse_from([
            "invite-preview",
            "preview",
            "classic",
            "--field",
            "title=Summer BBQ",
            "--field",
            "message=a=b",
        ]);
        let Command::Preview(args) = cli.command else {
            panic!("expected preview command");
        };
        let fields = args.fields.resolve().expect("resolve fields");
        assert_eq!(fields.title, "Summer BBQ");
        assert_eq!(fields.message, "a=b");
        assert!(fields.host.is_empty());
    }

    #[test]
    fn rejects_unknown_field_keys() {
        let parsed = GlobalCli::try_parse_from([
            "invite-preview",
            "preview",
            "classic",
            "--field",
            "guest_name=Bob",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn photo_url_requires_photo_flag() {
        let parsed = GlobalCli::try_parse_from([
            "invite-preview",
            "render",
            "classic",
            "--guest",
            "Ada",
            "--rsvp-url",
            "/r/1",
            "--photo-url",
            "/p.jpg",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn quiet_overrides_verbose_for_log_level() {
        assert_eq!(default_log_level(0, 0), Level::WARN);
        assert_eq!(default_log_level(1, 0), Level::INFO);
        assert_eq!(default_log_level(2, 0), Level::DEBUG);
        assert_eq!(default_log_level(5, 0), Level::TRACE);
        assert_eq!(default_log_level(3, 1), Level::WARN);
        assert_eq!(default_log_level(3, 2), Level::ERROR);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = GlobalCli::parse_from(["invite-preview", "templates", "-vv", "--templates", "designs"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.templates, Some(PathBuf::from("designs")));
        assert!(matches!(cli.command, Command::Templates));
    }
}
