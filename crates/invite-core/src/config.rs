use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use invite_editor_shared::PreviewDefaults;
use serde::Deserialize;
use tracing::{
  debug,
  info,
  warn
};

const CONFIG_ENV_VAR: &str =
  "INVITE_CONFIG";
const CONFIG_FILE_NAME: &str =
  "invite.toml";
const DEFAULT_TEMPLATES_DIR: &str =
  "templates/invitations";

#[derive(
  Debug, Clone, Default, Deserialize,
)]
#[serde(default)]
pub struct Config {
  pub templates_dir: Option<PathBuf>,
  pub color:         Option<bool>,
  pub preview:       PreviewDefaults
}

impl Config {
  #[tracing::instrument(skip(
    override_path
  ))]
  pub fn load(
    override_path: Option<&Path>
  ) -> anyhow::Result<Self> {
    let path =
      resolve_config_path(override_path)?;
    let Some(path) = path else {
      warn!(
        "no invite.toml found; using \
         defaults"
      );
      return Ok(Self::default());
    };

    info!(config = %path.display(), "loading config");
    Self::load_file(&path)
  }

  #[tracing::instrument]
  fn load_file(
    path: &Path
  ) -> anyhow::Result<Self> {
    let text = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    let mut cfg =
      toml::from_str::<Self>(&text)
        .with_context(|| {
          format!(
            "failed to parse {}",
            path.display()
          )
        })?;

    if let Some(dir) =
      cfg.templates_dir.take()
    {
      let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| {
          PathBuf::from(".")
        });
      cfg.templates_dir = Some(
        resolve_relative(&base_dir, &dir)
      );
    }
    debug!(templates_dir = ?cfg.templates_dir, "loaded config file");
    Ok(cfg)
  }

  pub fn color_enabled(&self) -> bool {
    self.color.unwrap_or(true)
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_templates_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    expand_tilde(path)
  } else if let Some(path) =
    cfg.templates_dir.as_deref()
  {
    path.to_path_buf()
  } else {
    PathBuf::from(DEFAULT_TEMPLATES_DIR)
  };

  if !dir.is_dir() {
    return Err(anyhow!(
      "template directory {} does not \
       exist",
      dir.display()
    ));
  }

  Ok(dir)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_config_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    let path = expand_tilde(path);
    if !path.exists() {
      return Err(anyhow!(
        "config file {} does not exist",
        path.display()
      ));
    }
    return Ok(Some(path));
  }

  if let Ok(raw) =
    std::env::var(CONFIG_ENV_VAR)
  {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
      return Ok(Some(expand_tilde(
        Path::new(trimmed)
      )));
    }
  }

  let local = PathBuf::from(
    CONFIG_FILE_NAME
  );
  if local.exists() {
    return Ok(Some(local));
  }

  if let Some(dir) = dirs::config_dir() {
    let candidate = dir
      .join("invite")
      .join(CONFIG_FILE_NAME);
    if candidate.exists() {
      return Ok(Some(candidate));
    }
  }

  Ok(None)
}

fn resolve_relative(
  base_dir: &Path,
  path: &Path
) -> PathBuf {
  let expanded = expand_tilde(path);
  if expanded.is_absolute() {
    expanded
  } else {
    base_dir.join(expanded)
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn relative_templates_dir_follows_config_file()
  {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("invite.toml");
    fs::write(
      &path,
      "templates_dir = \"designs\"\n\
       [preview]\n\
       title = \"Untitled\"\n"
    )
    .expect("write config");

    let cfg = Config::load(Some(&path))
      .expect("load config");
    assert_eq!(
      cfg.templates_dir.as_deref(),
      Some(temp.path().join("designs").as_path())
    );
    assert_eq!(cfg.preview.title, "Untitled");
    assert_eq!(
      cfg.preview.host,
      "Host Name"
    );
  }

  #[test]
  fn missing_override_is_an_error() {
    let temp = tempdir().expect("tempdir");
    let missing =
      temp.path().join("nope.toml");
    assert!(
      Config::load(Some(&missing)).is_err()
    );
  }

  #[test]
  fn templates_dir_override_wins() {
    let temp = tempdir().expect("tempdir");
    let cfg = Config {
      templates_dir: Some(
        PathBuf::from("/does/not/exist")
      ),
      ..Config::default()
    };
    let dir = resolve_templates_dir(
      &cfg,
      Some(temp.path())
    )
    .expect("resolve");
    assert_eq!(dir, temp.path());
  }

  #[test]
  fn missing_templates_dir_is_reported() {
    let cfg = Config {
      templates_dir: Some(
        PathBuf::from(
          "/definitely/not/here"
        )
      ),
      ..Config::default()
    };
    let err =
      resolve_templates_dir(&cfg, None)
        .expect_err("should fail");
    assert!(
      err
        .to_string()
        .contains("/definitely/not/here")
    );
  }
}
