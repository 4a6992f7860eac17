use serde::{
  Deserialize,
  Serialize
};

/// The six event form fields the preview tracks.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
  Title,
  Host,
  Date,
  Time,
  Location,
  Message
}

impl FormField {
  pub fn all() -> [Self; 6] {
    [
      Self::Title,
      Self::Host,
      Self::Date,
      Self::Time,
      Self::Location,
      Self::Message
    ]
  }

  /// Element id of the input carrying this field.
  pub fn element_id(
    self
  ) -> &'static str {
    match self {
      | Self::Title => "title",
      | Self::Host => "host",
      | Self::Date => "date",
      | Self::Time => "time",
      | Self::Location => "location",
      | Self::Message => "message"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    Self::all().into_iter().find(
      |field| field.element_id() == key
    )
  }
}

/// Raw form values, exactly as typed.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct EventFields {
  #[serde(default)]
  pub title:    String,
  #[serde(default)]
  pub host:     String,
  #[serde(default)]
  pub date:     String,
  #[serde(default)]
  pub time:     String,
  #[serde(default)]
  pub location: String,
  #[serde(default)]
  pub message:  String
}

impl EventFields {
  pub fn get(
    &self,
    field: FormField
  ) -> &str {
    match field {
      | FormField::Title => &self.title,
      | FormField::Host => &self.host,
      | FormField::Date => &self.date,
      | FormField::Time => &self.time,
      | FormField::Location => {
        &self.location
      }
      | FormField::Message => {
        &self.message
      }
    }
  }

  pub fn set(
    &mut self,
    field: FormField,
    value: impl Into<String>
  ) {
    let slot = match field {
      | FormField::Title => {
        &mut self.title
      }
      | FormField::Host => &mut self.host,
      | FormField::Date => &mut self.date,
      | FormField::Time => &mut self.time,
      | FormField::Location => {
        &mut self.location
      }
      | FormField::Message => {
        &mut self.message
      }
    };
    *slot = value.into();
  }

  /// Builds the value set by asking `read` for each
  /// field in turn.
  pub fn collect<F>(mut read: F) -> Self
  where
    F: FnMut(FormField) -> String
  {
    let mut fields = Self::default();
    for field in FormField::all() {
      fields.set(field, read(field));
    }
    fields
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn field_keys_match_element_ids() {
    for field in FormField::all() {
      assert_eq!(
        FormField::from_key(
          field.element_id()
        ),
        Some(field)
      );
    }
    assert_eq!(
      FormField::from_key("guest_name"),
      None
    );
  }

  #[test]
  fn collect_reads_every_field_once() {
    let mut seen = Vec::new();
    let fields =
      EventFields::collect(|field| {
        seen.push(field);
        format!("v-{}", field.element_id())
      });
    assert_eq!(seen.len(), 6);
    assert_eq!(fields.title, "v-title");
    assert_eq!(
      fields.get(FormField::Message),
      "v-message"
    );
  }

  #[test]
  fn missing_json_keys_default_to_empty() {
    let fields: EventFields =
      serde_json::from_str(
        r#"{"title":"Picnic"}"#
      )
      .expect("parse fields");
    assert_eq!(fields.title, "Picnic");
    assert!(fields.host.is_empty());
  }
}
