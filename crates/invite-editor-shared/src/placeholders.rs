use serde::{
  Deserialize,
  Serialize
};

use crate::fields::{
  EventFields,
  FormField
};
use crate::format::{
  format_date,
  format_guest_date,
  format_guest_time,
  format_time
};

const PHOTO_CONTENT_ID_SRC: &str =
  "cid:event_photo";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Placeholder {
  Title,
  Host,
  Date,
  Time,
  Location,
  Message,
  GuestName,
  RsvpUrl,
  PhotoDisplay,
  PhotoUrl
}

impl Placeholder {
  /// Tokens substituted by the editor preview, in
  /// substitution order.
  pub fn preview_tokens() -> [Self; 9] {
    [
      Self::Title,
      Self::Host,
      Self::Date,
      Self::Time,
      Self::Location,
      Self::Message,
      Self::GuestName,
      Self::RsvpUrl,
      Self::PhotoDisplay
    ]
  }

  pub fn token(self) -> &'static str {
    match self {
      | Self::Title => "{{title}}",
      | Self::Host => "{{host}}",
      | Self::Date => "{{date}}",
      | Self::Time => "{{time}}",
      | Self::Location => {
        "{{location}}"
      }
      | Self::Message => "{{message}}",
      | Self::GuestName => {
        "{{guest_name}}"
      }
      | Self::RsvpUrl => "{{rsvp_url}}",
      | Self::PhotoDisplay => {
        "{{photo_display}}"
      }
      | Self::PhotoUrl => {
        "{{photo_url}}"
      }
    }
  }

  fn for_field(
    field: FormField
  ) -> Self {
    match field {
      | FormField::Title => Self::Title,
      | FormField::Host => Self::Host,
      | FormField::Date => Self::Date,
      | FormField::Time => Self::Time,
      | FormField::Location => {
        Self::Location
      }
      | FormField::Message => {
        Self::Message
      }
    }
  }
}

/// Ordered token/value pairs applied with literal
/// string replacement.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct Replacements {
  pairs: Vec<(Placeholder, String)>
}

impl Replacements {
  pub fn push(
    &mut self,
    placeholder: Placeholder,
    value: impl Into<String>
  ) {
    self
      .pairs
      .push((placeholder, value.into()));
  }

  /// Replaces every occurrence of every token.
  /// Case-sensitive; unknown tokens stay verbatim.
  #[must_use]
  pub fn apply(
    &self,
    markup: &str
  ) -> String {
    let mut out = markup.to_string();
    for (placeholder, value) in
      &self.pairs
    {
      let token = placeholder.token();
      if out.contains(token) {
        out = out.replace(token, value);
      }
    }
    out
  }
}

/// Literal text shown in the editor preview for
/// empty fields and for guest data that does not
/// exist yet.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct PreviewDefaults {
  pub title:         String,
  pub host:          String,
  pub date:          String,
  pub time:          String,
  pub location:      String,
  pub message:       String,
  pub guest_name:    String,
  pub rsvp_url:      String,
  pub photo_display: String
}

impl Default for PreviewDefaults {
  fn default() -> Self {
    Self {
      title:         "Event Title"
        .to_string(),
      host:          "Host Name"
        .to_string(),
      date:          "Date TBD"
        .to_string(),
      time:          "Time TBD"
        .to_string(),
      location:      "Location TBD"
        .to_string(),
      message:       "You're invited \
                      to celebrate \
                      with us!"
        .to_string(),
      guest_name:    "Guest Name"
        .to_string(),
      rsvp_url:      "#".to_string(),
      photo_display: "none".to_string()
    }
  }
}

impl PreviewDefaults {
  pub fn fallback(
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

  /// The nine edit-mode substitutions for the
  /// current form values.
  pub fn replacements(
    &self,
    fields: &EventFields
  ) -> Replacements {
    let mut out = Replacements::default();
    for field in FormField::all() {
      let value = display_value(
        field,
        fields.get(field)
      );
      let value = if value.is_empty() {
        self.fallback(field).to_string()
      } else {
        value
      };
      out.push(
        Placeholder::for_field(field),
        value
      );
    }
    out.push(
      Placeholder::GuestName,
      self.guest_name.clone()
    );
    out.push(
      Placeholder::RsvpUrl,
      self.rsvp_url.clone()
    );
    out.push(
      Placeholder::PhotoDisplay,
      self.photo_display.clone()
    );
    out
  }

  #[must_use]
  pub fn render(
    &self,
    markup: &str,
    fields: &EventFields
  ) -> String {
    self.replacements(fields).apply(markup)
  }
}

/// One real recipient, used when rendering the
/// invitation that is actually sent.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct GuestContext {
  pub guest_name: String,
  pub rsvp_url:   String,
  #[serde(default)]
  pub has_photo:  bool,
  /// Web address of the event photo. Without one,
  /// or with an empty one, the photo is referenced
  /// as an inline mail attachment.
  #[serde(default)]
  pub photo_url:  Option<String>
}

/// Renders `markup` for one guest. Empty fields
/// render as empty text and dates and times use the
/// zero-padded mail formats.
#[must_use]
pub fn render_for_guest(
  markup: &str,
  fields: &EventFields,
  guest: &GuestContext
) -> String {
  let mut replacements =
    Replacements::default();
  for field in FormField::all() {
    replacements.push(
      Placeholder::for_field(field),
      guest_value(
        field,
        fields.get(field)
      )
    );
  }
  replacements.push(
    Placeholder::GuestName,
    guest.guest_name.clone()
  );
  replacements.push(
    Placeholder::RsvpUrl,
    guest.rsvp_url.clone()
  );

  if guest.has_photo {
    let src = guest
      .photo_url
      .clone()
      .filter(|url| !url.is_empty())
      .unwrap_or_else(|| {
        PHOTO_CONTENT_ID_SRC.to_string()
      });
    replacements
      .push(Placeholder::PhotoUrl, src);
    replacements.push(
      Placeholder::PhotoDisplay,
      "block"
    );
  } else {
    replacements.push(
      Placeholder::PhotoDisplay,
      "none"
    );
  }

  replacements.apply(markup)
}

fn display_value(
  field: FormField,
  raw: &str
) -> String {
  match field {
    | FormField::Date => format_date(raw),
    | FormField::Time => format_time(raw),
    | _ => raw.to_string()
  }
}

fn guest_value(
  field: FormField,
  raw: &str
) -> String {
  match field {
    | FormField::Date => {
      format_guest_date(raw)
    }
    | FormField::Time => {
      format_guest_time(raw)
    }
    | _ => raw.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_fields() -> EventFields {
    EventFields {
      title:    "Garden Party".to_string(),
      host:     "The Smiths".to_string(),
      date:     "2025-01-05".to_string(),
      time:     "13:05".to_string(),
      location: "Backyard".to_string(),
      message:  "Bring a hat".to_string()
    }
  }

  #[test]
  fn each_field_replaces_its_token() {
    let defaults =
      PreviewDefaults::default();
    let markup = "{{title}}|{{host}}|\
                  {{date}}|{{time}}|\
                  {{location}}|{{message}}";
    assert_eq!(
      defaults
        .render(markup, &sample_fields()),
      "Garden Party|The Smiths|January \
       5, 2025|1:05 PM|Backyard|Bring a \
       hat"
    );
  }

  #[test]
  fn empty_fields_use_fallbacks() {
    let defaults =
      PreviewDefaults::default();
    let markup = "{{title}}|{{host}}|\
                  {{date}}|{{time}}|\
                  {{location}}|{{message}}";
    assert_eq!(
      defaults.render(
        markup,
        &EventFields::default()
      ),
      "Event Title|Host Name|Date \
       TBD|Time TBD|Location TBD|You're \
       invited to celebrate with us!"
    );
  }

  #[test]
  fn edit_mode_constants_fill_guest_tokens() {
    let defaults =
      PreviewDefaults::default();
    let html = defaults.render(
      "<p>{{guest_name}}</p><a \
       href=\"{{rsvp_url}}\"></a><img \
       style=\"display:{{photo_display}}\"\
       >",
      &EventFields::default()
    );
    assert_eq!(
      html,
      "<p>Guest Name</p><a \
       href=\"#\"></a><img \
       style=\"display:none\">"
    );
  }

  #[test]
  fn replacement_is_exhaustive() {
    let defaults =
      PreviewDefaults::default();
    let html = defaults.render(
      "{{title}} {{title}} {{title}}",
      &sample_fields()
    );
    assert_eq!(
      html.matches("Garden Party").count(),
      3
    );
    assert!(!html.contains("{{title}}"));
  }

  #[test]
  fn unknown_and_differently_cased_tokens_stay() {
    let defaults =
      PreviewDefaults::default();
    let html = defaults.render(
      "{{Title}} {{venue}} {{photo_url}}",
      &sample_fields()
    );
    assert_eq!(
      html,
      "{{Title}} {{venue}} {{photo_url}}"
    );
  }

  #[test]
  fn field_values_are_not_reinterpreted() {
    let defaults =
      PreviewDefaults::default();
    let mut fields =
      EventFields::default();
    fields.title = "$1 {{ }}".to_string();
    assert_eq!(
      defaults.render(
        "<h1>{{title}}</h1>",
        &fields
      ),
      "<h1>$1 {{ }}</h1>"
    );
  }

  #[test]
  fn guest_render_uses_inline_photo_by_default()
  {
    let guest = GuestContext {
      guest_name: "Ada".to_string(),
      rsvp_url:   "https://x/r/abc"
        .to_string(),
      has_photo:  true,
      photo_url:  None
    };
    let html = render_for_guest(
      "{{guest_name}} {{rsvp_url}} \
       {{photo_url}} {{photo_display}}",
      &sample_fields(),
      &guest
    );
    assert_eq!(
      html,
      "Ada https://x/r/abc \
       cid:event_photo block"
    );
  }

  #[test]
  fn guest_render_without_photo_hides_it() {
    let guest = GuestContext {
      guest_name: "Ada".to_string(),
      rsvp_url:   "/r/abc".to_string(),
      has_photo:  false,
      photo_url:  Some(
        "/uploads/p.jpg".to_string()
      )
    };
    let html = render_for_guest(
      "{{photo_display}} {{photo_url}} \
       [{{host}}]",
      &EventFields::default(),
      &guest
    );
    assert_eq!(
      html,
      "none {{photo_url}} []"
    );
  }

  #[test]
  fn guest_render_pads_dates_and_ignores_empty_photo_url()
  {
    let guest = GuestContext {
      guest_name: "Ada".to_string(),
      rsvp_url:   "/r/abc".to_string(),
      has_photo:  true,
      photo_url:  Some(String::new())
    };
    let html = render_for_guest(
      "{{date}}|{{time}}|{{photo_url}}",
      &sample_fields(),
      &guest
    );
    assert_eq!(
      html,
      "January 05, 2025|01:05 PM|\
       cid:event_photo"
    );
  }

  #[test]
  fn defaults_deserialize_partially() {
    let defaults: PreviewDefaults =
      serde_json::from_str(
        r#"{"title":"Untitled"}"#
      )
      .expect("parse defaults");
    assert_eq!(defaults.title, "Untitled");
    assert_eq!(defaults.host, "Host Name");
  }
}
