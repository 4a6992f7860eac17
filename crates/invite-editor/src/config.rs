use invite_editor_shared::PreviewDefaults;
use invite_editor_shared::preview::TEMPLATE_PREVIEW_PREFIX;
use serde::Deserialize;

const EDITOR_CONFIG_TOML: &str =
  include_str!("../assets/editor.toml");

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct EditorConfig {
  #[serde(default)]
  pub version: u32,
  #[serde(default)]
  pub preview: PreviewConfig
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct PreviewConfig {
  #[serde(
    default = "default_endpoint_prefix"
  )]
  pub endpoint_prefix:  String,
  #[serde(
    default = "default_resize_delay_ms"
  )]
  pub resize_delay_ms:  u32,
  #[serde(
    default = "default_height_margin_px"
  )]
  pub height_margin_px: i32,
  #[serde(
    default = "default_min_height_px"
  )]
  pub min_height_px:    u32,
  #[serde(default)]
  pub fallbacks:        PreviewDefaults
}

impl Default for EditorConfig {
  fn default() -> Self {
    Self {
      version: 1,
      preview: PreviewConfig::default()
    }
  }
}

impl Default for PreviewConfig {
  fn default() -> Self {
    Self {
      endpoint_prefix:
        default_endpoint_prefix(),
      resize_delay_ms:
        default_resize_delay_ms(),
      height_margin_px:
        default_height_margin_px(),
      min_height_px:
        default_min_height_px(),
      fallbacks:
        PreviewDefaults::default()
    }
  }
}

fn default_endpoint_prefix() -> String {
  TEMPLATE_PREVIEW_PREFIX.to_string()
}

fn default_resize_delay_ms() -> u32 {
  100
}

fn default_height_margin_px() -> i32 {
  20
}

fn default_min_height_px() -> u32 {
  500
}

pub fn load_editor_config() -> EditorConfig
{
  parse_editor_config(EDITOR_CONFIG_TOML)
}

fn parse_editor_config(
  raw: &str
) -> EditorConfig {
  match toml::from_str::<EditorConfig>(
    raw
  ) {
    | Ok(mut config) => {
      sanitize_editor_config(&mut config);
      tracing::info!(
        version = config.version,
        endpoint = %config.preview.endpoint_prefix,
        resize_delay_ms = config.preview.resize_delay_ms,
        "loaded editor config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(%error, "failed parsing editor config; using defaults");
      EditorConfig::default()
    }
  }
}

fn sanitize_editor_config(
  config: &mut EditorConfig
) {
  let prefix =
    &mut config.preview.endpoint_prefix;
  if prefix.trim().is_empty() {
    *prefix = default_endpoint_prefix();
  } else if !prefix.ends_with('/') {
    prefix.push('/');
  }
}
