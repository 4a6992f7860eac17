use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum EditorError {
  #[error("browser window is unavailable")]
  NoWindow,

  #[error("document is unavailable")]
  NoDocument,

  #[error("missing element: {0}")]
  MissingElement(String),

  #[error(
    "element {selector} is not a {expected}"
  )]
  WrongElementType {
    selector: String,
    expected: &'static str
  },

  #[error("{context}: {message}")]
  Js {
    context: &'static str,
    message: String
  },

  #[error("template request failed: {0}")]
  Fetch(String)
}

impl EditorError {
  pub fn js(
    context: &'static str,
    value: JsValue
  ) -> Self {
    Self::Js {
      context,
      message: format!("{value:?}")
    }
  }
}

pub type Result<T> =
  std::result::Result<T, EditorError>;
