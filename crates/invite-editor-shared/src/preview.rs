use crate::fields::EventFields;
use crate::placeholders::PreviewDefaults;

pub const TEMPLATE_PREVIEW_PREFIX: &str =
  "/api/template-preview/";

/// Hands out increasing request numbers and
/// remembers the newest one.
#[derive(Debug, Clone, Default)]
pub struct RequestGenerations {
  latest: u64
}

impl RequestGenerations {
  pub fn issue(&mut self) -> u64 {
    self.latest += 1;
    self.latest
  }

  pub fn latest(&self) -> u64 {
    self.latest
  }

  pub fn is_current(
    &self,
    generation: u64
  ) -> bool {
    generation == self.latest
  }
}

/// One outstanding template fetch.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct PreviewRequest {
  pub generation: u64,
  pub template:   String,
  pub path:       String
}

/// Request bookkeeping for the live preview.
///
/// Every refresh issues a new generation. A fetched
/// body is rendered only while its generation is
/// still the newest, so a slow response can never
/// overwrite the preview of a later edit.
#[derive(Debug, Clone)]
pub struct PreviewSession {
  defaults:    PreviewDefaults,
  path_prefix: String,
  generations: RequestGenerations
}

impl Default for PreviewSession {
  fn default() -> Self {
    Self::new(
      PreviewDefaults::default(),
      TEMPLATE_PREVIEW_PREFIX
    )
  }
}

impl PreviewSession {
  pub fn new(
    defaults: PreviewDefaults,
    path_prefix: impl Into<String>
  ) -> Self {
    Self {
      defaults,
      path_prefix: path_prefix.into(),
      generations:
        RequestGenerations::default()
    }
  }

  /// Starts a refresh for the checked template.
  /// Returns `None` when no template is selected,
  /// leaving the current preview in place.
  pub fn begin(
    &mut self,
    selected_template: Option<&str>
  ) -> Option<PreviewRequest> {
    let template = selected_template?;
    let generation =
      self.generations.issue();
    Some(PreviewRequest {
      generation,
      template: template.to_string(),
      path: format!(
        "{}{}",
        self.path_prefix, template
      )
    })
  }

  /// Substitutes `markup` for a finished request.
  /// Returns `None` for a request that has been
  /// superseded.
  pub fn complete(
    &self,
    request: &PreviewRequest,
    markup: &str,
    fields: &EventFields
  ) -> Option<String> {
    if !self
      .generations
      .is_current(request.generation)
    {
      return None;
    }
    Some(
      self.defaults.render(markup, fields)
    )
  }

  pub fn latest_generation(&self) -> u64 {
    self.generations.latest()
  }
}
