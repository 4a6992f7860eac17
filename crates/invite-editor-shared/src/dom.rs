//! Element ids, class names and attributes the
//! server-rendered editor page provides.

pub const PREVIEW_CONTAINER_ID: &str =
  "previewFrame";
pub const TEMPLATE_RADIO_SELECTOR: &str =
  "input[name=\"template\"]";

pub const CONTACT_SEARCH_ID: &str =
  "contactSearch";
pub const SELECTED_COUNT_ID: &str =
  "selectedCount";
pub const CONTACT_ROW_SELECTOR: &str =
  ".contact-checkbox";
pub const CONTACT_CHECKBOX_SELECTOR: &str =
  "input[type=\"checkbox\"]";
pub const SEND_METHOD_SELECTOR: &str =
  ".send-method-select";
pub const CONTACT_TAGS_ATTR: &str =
  "data-tags";

pub const SELECT_TAG_BUTTON_SELECTOR:
  &str = "[data-select-tag]";
pub const SELECT_TAG_ATTR: &str =
  "data-select-tag";
pub const SELECT_ALL_BUTTON_SELECTOR:
  &str = "[data-select-all]";
pub const SELECT_ALL_ATTR: &str =
  "data-select-all";

pub const ROW_VISIBLE_DISPLAY: &str =
  "flex";
pub const SEND_METHOD_VISIBLE_DISPLAY:
  &str = "inline-block";
pub const HIDDEN_DISPLAY: &str = "none";

/// Functions installed on `window` for inline
/// `onclick` handlers in server-rendered markup.
pub const SELECT_BY_TAG_GLOBAL: &str =
  "selectByTag";
pub const SELECT_ALL_GLOBAL: &str =
  "selectAll";
pub const REFRESH_PREVIEW_GLOBAL: &str =
  "refreshPreview";
pub const PAGE_HELPERS: [&str; 3] = [
  SELECT_BY_TAG_GLOBAL,
  SELECT_ALL_GLOBAL,
  REFRESH_PREVIEW_GLOBAL
];
