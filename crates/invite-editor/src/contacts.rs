use std::rc::Rc;

use gloo::events::EventListener;
use invite_editor_shared::dom::{
  CONTACT_CHECKBOX_SELECTOR,
  CONTACT_ROW_SELECTOR,
  CONTACT_SEARCH_ID,
  CONTACT_TAGS_ATTR,
  HIDDEN_DISPLAY,
  ROW_VISIBLE_DISPLAY,
  SELECT_ALL_ATTR,
  SELECT_ALL_BUTTON_SELECTOR,
  SELECT_TAG_ATTR,
  SELECT_TAG_BUTTON_SELECTOR,
  SELECTED_COUNT_ID,
  SEND_METHOD_SELECTOR,
  SEND_METHOD_VISIBLE_DISPLAY
};
use invite_editor_shared::{
  ContactRow,
  ContactSelector,
  CountDisplay
};
use web_sys::{
  Document,
  HtmlElement,
  HtmlInputElement
};

use crate::dom::{
  is_displayed,
  optional_by_id,
  query_all_in_document,
  query_one,
  set_display
};
use crate::error::{
  EditorError,
  Result
};
use crate::ui_debug;

pub struct DomContactRow {
  row:         HtmlElement,
  checkbox:    HtmlInputElement,
  send_method: Option<HtmlElement>
}

impl DomContactRow {
  fn resolve(
    row: HtmlElement
  ) -> Result<Self> {
    let checkbox = query_one::<
      HtmlInputElement
    >(
      &row,
      CONTACT_CHECKBOX_SELECTOR,
      "HtmlInputElement"
    )?
    .ok_or_else(|| {
      EditorError::MissingElement(format!(
        "{CONTACT_ROW_SELECTOR} \
         {CONTACT_CHECKBOX_SELECTOR}"
      ))
    })?;
    let send_method = query_one::<
      HtmlElement
    >(
      &row,
      SEND_METHOD_SELECTOR,
      "HtmlElement"
    )?;
    Ok(Self {
      row,
      checkbox,
      send_method
    })
  }
}

impl ContactRow for DomContactRow {
  fn text(&self) -> String {
    self.row.text_content().unwrap_or_default()
  }

  fn tags(&self) -> String {
    self
      .row
      .get_attribute(CONTACT_TAGS_ATTR)
      .unwrap_or_default()
  }

  fn is_checked(&self) -> bool {
    self.checkbox.checked()
  }

  fn set_checked(&self, checked: bool) {
    self.checkbox.set_checked(checked);
  }

  fn is_visible(&self) -> bool {
    is_displayed(&self.row)
  }

  fn set_visible(&self, visible: bool) {
    set_display(
      &self.row,
      if visible {
        ROW_VISIBLE_DISPLAY
      } else {
        HIDDEN_DISPLAY
      }
    );
  }

  fn set_send_method_visible(
    &self,
    visible: bool
  ) {
    if let Some(control) = &self.send_method
    {
      set_display(
        control,
        if visible {
          SEND_METHOD_VISIBLE_DISPLAY
        } else {
          HIDDEN_DISPLAY
        }
      );
    }
  }
}

pub struct DomCountDisplay(HtmlElement);

impl CountDisplay for DomCountDisplay {
  fn set_text(&self, text: &str) {
    self.0.set_text_content(Some(text));
  }
}

type DomSelector =
  ContactSelector<DomContactRow, DomCountDisplay>;

/// Elements of the recipient panel, resolved once
/// at mount.
pub struct ContactElements {
  pub search:             HtmlInputElement,
  pub count:              Option<HtmlElement>,
  pub rows:               Vec<DomContactRow>,
  pub tag_buttons:        Vec<HtmlElement>,
  pub select_all_buttons: Vec<HtmlElement>
}

impl ContactElements {
  /// `None` when the page has no contact panel.
  pub fn resolve(
    document: &Document
  ) -> Result<Option<Self>> {
    let Some(search) = optional_by_id::<
      HtmlInputElement
    >(
      document,
      CONTACT_SEARCH_ID,
      "HtmlInputElement"
    )?
    else {
      return Ok(None);
    };
    let count = optional_by_id::<
      HtmlElement
    >(
      document,
      SELECTED_COUNT_ID,
      "HtmlElement"
    )?;

    let rows = query_all_in_document::<
      HtmlElement
    >(
      document,
      CONTACT_ROW_SELECTOR,
      "HtmlElement"
    )?
    .into_iter()
    .map(DomContactRow::resolve)
    .collect::<Result<Vec<_>>>()?;

    let tag_buttons =
      query_all_in_document::<HtmlElement>(
        document,
        SELECT_TAG_BUTTON_SELECTOR,
        "HtmlElement"
      )?;
    let select_all_buttons =
      query_all_in_document::<HtmlElement>(
        document,
        SELECT_ALL_BUTTON_SELECTOR,
        "HtmlElement"
      )?;

    Ok(Some(Self {
      search,
      count,
      rows,
      tag_buttons,
      select_all_buttons
    }))
  }
}

/// Recipient list behaviour: search, bulk select and
/// per-contact delivery-method controls.
pub struct ContactPanel {
  selector:   Rc<DomSelector>,
  _listeners: Vec<EventListener>
}

impl ContactPanel {
  pub fn mount(
    elements: ContactElements
  ) -> Self {
    let ContactElements {
      search,
      count,
      rows,
      tag_buttons,
      select_all_buttons
    } = elements;

    let checkboxes: Vec<HtmlInputElement> =
      rows
        .iter()
        .map(|row| row.checkbox.clone())
        .collect();
    let selector = Rc::new(
      ContactSelector::new(
        rows,
        count.map(DomCountDisplay)
      )
    );
    // pre-checked rows stay hidden here as well
    selector.initialize();

    let mut listeners = Vec::new();

    {
      let selector = Rc::clone(&selector);
      let input = search.clone();
      listeners.push(EventListener::new(
        &search,
        "input",
        move |_event| {
          let query = input.value();
          let visible =
            selector.filter(&query);
          ui_debug(
            "contact-search",
            &format!(
              "{query:?} -> {visible} visible"
            )
          );
        }
      ));
    }

    for (index, checkbox) in
      checkboxes.iter().enumerate()
    {
      let selector = Rc::clone(&selector);
      listeners.push(EventListener::new(
        checkbox,
        "change",
        move |_event| {
          selector.checkbox_changed(index);
        }
      ));
    }

    for button in &tag_buttons {
      let Some(tag) =
        button.get_attribute(SELECT_TAG_ATTR)
      else {
        continue;
      };
      let selector = Rc::clone(&selector);
      listeners.push(EventListener::new(
        button,
        "click",
        move |_event| {
          select_by_tag(&selector, &tag);
        }
      ));
    }

    for button in &select_all_buttons {
      let raw = button
        .get_attribute(SELECT_ALL_ATTR)
        .unwrap_or_default();
      let Some(checked) =
        parse_select_all_flag(&raw)
      else {
        tracing::warn!(
          value = %raw,
          "ignoring select-all button with \
           unrecognised flag"
        );
        continue;
      };
      let selector = Rc::clone(&selector);
      listeners.push(EventListener::new(
        button,
        "click",
        move |_event| {
          select_all(&selector, checked);
        }
      ));
    }

    tracing::info!(
      rows = selector.rows().len(),
      tag_buttons = tag_buttons.len(),
      select_all_buttons =
        select_all_buttons.len(),
      "mounted contact selector"
    );

    Self {
      selector,
      _listeners: listeners
    }
  }

  pub fn select_by_tag(
    &self,
    tag: &str
  ) -> usize {
    select_by_tag(&self.selector, tag)
  }

  pub fn select_all(
    &self,
    checked: bool
  ) -> usize {
    select_all(&self.selector, checked)
  }
}

fn select_by_tag(
  selector: &DomSelector,
  tag: &str
) -> usize {
  let matched = selector.select_by_tag(tag);
  ui_debug(
    "contact-select-tag",
    &format!("{tag:?} matched {matched}")
  );
  matched
}

fn select_all(
  selector: &DomSelector,
  checked: bool
) -> usize {
  let touched = selector.select_all(checked);
  ui_debug(
    "contact-select-all",
    &format!(
      "checked={checked} touched {touched}"
    )
  );
  touched
}

fn parse_select_all_flag(
  raw: &str
) -> Option<bool> {
  match raw.trim() {
    | "true" => Some(true),
    | "false" => Some(false),
    | _ => None
  }
}

#[cfg(test)]
mod tests {
  use super::parse_select_all_flag;

  #[test]
  fn select_all_flag_accepts_booleans_only()
  {
    assert_eq!(
      parse_select_all_flag("true"),
      Some(true)
    );
    assert_eq!(
      parse_select_all_flag(" false "),
      Some(false)
    );
    assert_eq!(
      parse_select_all_flag("yes"),
      None
    );
    assert_eq!(
      parse_select_all_flag(""),
      None
    );
  }
}
