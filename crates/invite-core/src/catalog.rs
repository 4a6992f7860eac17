use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::sync::OnceLock;

use anyhow::{
  Context,
  anyhow
};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

const TEMPLATE_EXTENSION: &str = "html";

/// One selectable invitation design.
#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct TemplateChoice {
  pub value: String,
  pub label: String
}

impl TemplateChoice {
  pub fn from_stem(stem: &str) -> Self {
    Self {
      value: stem.to_string(),
      label: template_label(stem)
    }
  }
}

/// Invitation templates stored as `<name>.html`
/// files in one directory.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
  dir: PathBuf
}

impl TemplateCatalog {
  pub fn open(dir: &Path) -> Self {
    Self {
      dir: dir.to_path_buf()
    }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  #[tracing::instrument(skip(self))]
  pub fn list(
    &self
  ) -> anyhow::Result<Vec<TemplateChoice>>
  {
    let entries = fs::read_dir(&self.dir)
      .with_context(|| {
        format!(
          "failed to read template \
           directory {}",
          self.dir.display()
        )
      })?;

    let mut stems = Vec::new();
    for entry in entries {
      let path = entry?.path();
      if !path.is_file()
        || path
          .extension()
          .and_then(|ext| ext.to_str())
          != Some(TEMPLATE_EXTENSION)
      {
        continue;
      }
      if let Some(stem) = path
        .file_stem()
        .and_then(|stem| stem.to_str())
      {
        stems.push(stem.to_string());
      }
    }
    stems.sort();

    debug!(count = stems.len(), "listed templates");
    Ok(
      stems
        .iter()
        .map(|stem| {
          TemplateChoice::from_stem(stem)
        })
        .collect()
    )
  }

  pub fn path_for(
    &self,
    name: &str
  ) -> anyhow::Result<PathBuf> {
    if !is_valid_template_name(name) {
      return Err(anyhow!(
        "invalid template name: {name:?}"
      ));
    }
    Ok(self.dir.join(format!(
      "{name}.{TEMPLATE_EXTENSION}"
    )))
  }

  #[tracing::instrument(skip(self))]
  pub fn load(
    &self,
    name: &str
  ) -> anyhow::Result<String> {
    let path = self.path_for(name)?;
    if !path.is_file() {
      return Err(anyhow!(
        "template not found: {name}"
      ));
    }
    let markup = fs::read_to_string(&path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    debug!(
      file = %path.display(),
      bytes = markup.len(),
      "loaded template"
    );
    Ok(markup)
  }
}

/// Letters, digits, `_` and `-` only.
pub fn is_valid_template_name(
  name: &str
) -> bool {
  static NAME_RE: OnceLock<
    Option<Regex>
  > = OnceLock::new();
  NAME_RE
    .get_or_init(|| {
      Regex::new(r"^[A-Za-z0-9_-]+$").ok()
    })
    .as_ref()
    .is_some_and(|re| re.is_match(name))
}

/// `garden_party` -> `Garden Party`.
///
/// Each `_` becomes a space. A cased letter is
/// upper-cased when the character before it is not a
/// cased letter and lower-cased otherwise, so
/// `2nd_bday` gives `2Nd Bday` and doubled
/// underscores keep both spaces.
pub fn template_label(stem: &str) -> String {
  let mut label =
    String::with_capacity(stem.len());
  let mut after_cased = false;
  for ch in stem.chars() {
    let ch = if ch == '_' { ' ' } else { ch };
    let cased =
      ch.is_lowercase() || ch.is_uppercase();
    match (cased, after_cased) {
      | (true, true) => {
        label.extend(ch.to_lowercase())
      }
      | (true, false) => {
        label.extend(ch.to_uppercase())
      }
      | (false, _) => label.push(ch)
    }
    after_cased = cased;
  }
  label
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn labels_are_title_cased() {
    assert_eq!(
      template_label("garden_party"),
      "Garden Party"
    );
    assert_eq!(
      template_label("BIRTHDAY"),
      "Birthday"
    );
    assert_eq!(
      template_label("modern__dark"),
      "Modern  Dark"
    );
  }

  #[test]
  fn labels_capitalise_after_digits() {
    assert_eq!(
      template_label("2nd_bday"),
      "2Nd Bday"
    );
    assert_eq!(
      template_label("retro-80s"),
      "Retro-80S"
    );
  }

  #[test]
  fn names_with_paths_are_rejected() {
    assert!(is_valid_template_name(
      "classic-2"
    ));
    assert!(!is_valid_template_name(
      "../secrets"
    ));
    assert!(!is_valid_template_name(
      "a/b"
    ));
    assert!(!is_valid_template_name(""));
    assert!(!is_valid_template_name(
      "classic.html"
    ));
  }
}
