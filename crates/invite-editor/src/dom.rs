use invite_editor_shared::dom::HIDDEN_DISPLAY;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  EventTarget,
  HtmlElement,
  HtmlInputElement,
  HtmlTextAreaElement,
  NodeList
};

use crate::error::{
  EditorError,
  Result
};

pub fn document() -> Result<Document> {
  web_sys::window()
    .ok_or(EditorError::NoWindow)?
    .document()
    .ok_or(EditorError::NoDocument)
}

pub fn optional_by_id<T: JsCast>(
  document: &Document,
  id: &str,
  expected: &'static str
) -> Result<Option<T>> {
  let Some(element) =
    document.get_element_by_id(id)
  else {
    return Ok(None);
  };
  element
    .dyn_into::<T>()
    .map(Some)
    .map_err(|_| {
      EditorError::WrongElementType {
        selector: format!("#{id}"),
        expected
      }
    })
}

pub fn query_all_in_document<
  T: JsCast
>(
  document: &Document,
  selector: &str,
  expected: &'static str
) -> Result<Vec<T>> {
  let list = document
    .query_selector_all(selector)
    .map_err(|value| {
      EditorError::js(
        "query_selector_all",
        value
      )
    })?;
  cast_nodes(list, selector, expected)
}

pub fn query_one<T: JsCast>(
  root: &Element,
  selector: &str,
  expected: &'static str
) -> Result<Option<T>> {
  let found = root
    .query_selector(selector)
    .map_err(|value| {
      EditorError::js(
        "query_selector",
        value
      )
    })?;
  found
    .map(|element| {
      element.dyn_into::<T>().map_err(
        |_| EditorError::WrongElementType {
          selector: selector.to_string(),
          expected
        }
      )
    })
    .transpose()
}

fn cast_nodes<T: JsCast>(
  list: NodeList,
  selector: &str,
  expected: &'static str
) -> Result<Vec<T>> {
  let mut out =
    Vec::with_capacity(list.length() as usize);
  for index in 0..list.length() {
    let Some(node) = list.get(index) else {
      continue;
    };
    let element =
      node.dyn_into::<T>().map_err(|_| {
        EditorError::WrongElementType {
          selector: selector.to_string(),
          expected
        }
      })?;
    out.push(element);
  }
  Ok(out)
}

pub fn set_display(
  element: &HtmlElement,
  value: &str
) {
  if let Err(error) = element
    .style()
    .set_property("display", value)
  {
    tracing::warn!(
      ?error,
      display = value,
      "failed to set display style"
    );
  }
}

pub fn is_displayed(
  element: &HtmlElement
) -> bool {
  element
    .style()
    .get_property_value("display")
    .map(|value| value != HIDDEN_DISPLAY)
    .unwrap_or(true)
}

/// A tracked form control; the message field is a
/// textarea, the rest are inputs.
#[derive(Clone)]
pub enum FieldInput {
  Input(HtmlInputElement),
  TextArea(HtmlTextAreaElement)
}

impl FieldInput {
  pub fn resolve(
    document: &Document,
    id: &str
  ) -> Result<Self> {
    let element = document
      .get_element_by_id(id)
      .ok_or_else(|| {
        EditorError::MissingElement(
          format!("#{id}")
        )
      })?;
    let element = match element
      .dyn_into::<HtmlInputElement>()
    {
      | Ok(input) => {
        return Ok(Self::Input(input));
      }
      | Err(element) => element
    };
    element
      .dyn_into::<HtmlTextAreaElement>()
      .map(Self::TextArea)
      .map_err(|_| {
        EditorError::WrongElementType {
          selector: format!("#{id}"),
          expected: "input or textarea"
        }
      })
  }

  pub fn value(&self) -> String {
    match self {
      | Self::Input(input) => input.value(),
      | Self::TextArea(area) => area.value()
    }
  }

  pub fn target(&self) -> &EventTarget {
    match self {
      | Self::Input(input) => {
        input.as_ref()
      }
      | Self::TextArea(area) => {
        area.as_ref()
      }
    }
  }
}
