//! Platform-neutral logic behind the invitation
//! editor screen.
//!
//! Nothing in here touches the DOM. The browser
//! frontend wires these types to real elements and
//! the command-line previewer wires them to files,
//! so every rule about tokens, formatting and
//! contact selection lives in one place.

pub mod contacts;
pub mod dom;
pub mod fields;
pub mod format;
pub mod placeholders;
pub mod preview;
pub mod sections;

pub use contacts::{
  ContactRow,
  ContactSelector,
  CountDisplay
};
pub use fields::{
  EventFields,
  FormField
};
pub use format::{
  format_date,
  format_guest_date,
  format_guest_time,
  format_time
};
pub use placeholders::{
  GuestContext,
  Placeholder,
  PreviewDefaults,
  Replacements,
  render_for_guest
};
pub use preview::{
  PreviewRequest,
  PreviewSession,
  RequestGenerations
};
pub use sections::Section;
