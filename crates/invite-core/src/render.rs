use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, anyhow};
use tempfile::NamedTempFile;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::catalog::TemplateChoice;
use crate::config::Config;

const VALUE_HEADER: &str = "Template";
const LABEL_HEADER: &str = "Label";

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.color_enabled(),
        }
    }

    #[tracing::instrument(skip(self, choices))]
    pub fn print_template_table(&mut self, choices: &[TemplateChoice]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        write_template_table(&mut out, choices, |value| self.paint(value, "33"))
    }

    /// Writes rendered markup to `output`, or stdout when none is given.
    #[tracing::instrument(skip(self, markup))]
    pub fn emit_markup(&mut self, markup: &str, output: Option<&Path>) -> anyhow::Result<()> {
        match output {
            Some(path) => {
                write_atomically(path, markup)?;
                info!(file = %path.display(), bytes = markup.len(), "wrote rendered invitation");
            }
            None => {
                let mut out = io::stdout().lock();
                out.write_all(markup.as_bytes())?;
                if !markup.ends_with('\n') {
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

pub fn write_atomically(path: &Path, contents: &str) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut temp = NamedTempFile::new_in(&dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;
    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}

/// Two columns, template value then label. Cells are padded before
/// `paint_value` runs so colour codes never count toward the width.
fn write_template_table<W: Write>(
    mut writer: W,
    choices: &[TemplateChoice],
    paint_value: impl Fn(&str) -> String,
) -> anyhow::Result<()> {
    let value_width = choices
        .iter()
        .map(|choice| choice.value.width())
        .fold(VALUE_HEADER.width(), usize::max);
    let label_width = choices
        .iter()
        .map(|choice| choice.label.width())
        .fold(LABEL_HEADER.width(), usize::max);

    writeln!(
        writer,
        "{} {}",
        pad(VALUE_HEADER, value_width),
        pad(LABEL_HEADER, label_width)
    )?;
    writeln!(writer, "{} {}", "-".repeat(value_width), "-".repeat(label_width))?;

    for choice in choices {
        writeln!(
            writer,
            "{} {}",
            paint_value(&pad(&choice.value, value_width)),
            pad(&choice.label, label_width)
        )?;
    }

    Ok(())
}

fn pad(text: &str, width: usize) -> String {
    format!("{text}{}", " ".repeat(width.saturating_sub(text.width())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_to_widest_cell_before_painting() {
        let choices = vec![
            TemplateChoice::from_stem("garden_party"),
            TemplateChoice::from_stem("classic"),
        ];
        let mut buf = Vec::new();
        write_template_table(&mut buf, &choices, |value| format!("<{value}>"))
            .expect("write table");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Template     Label       ");
        assert_eq!(lines[1], "------------ ------------");
        assert_eq!(lines[2], "<garden_party> Garden Party");
        assert_eq!(lines[3], "<classic     > Classic     ");
    }

    #[test]
    fn atomic_write_creates_parent_dirs() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("out").join("preview.html");
        write_atomically(&path, "<p>hi</p>").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "<p>hi</p>");
    }
}
