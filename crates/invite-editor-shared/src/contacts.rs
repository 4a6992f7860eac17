/// One selectable recipient in the contact list.
///
/// Implementations are backed by live elements in
/// the browser and by plain cells in tests, so all
/// methods take `&self`.
pub trait ContactRow {
  /// Full text content of the row.
  fn text(&self) -> String;
  /// Raw comma-separated tag list; empty when the
  /// row carries none.
  fn tags(&self) -> String;
  fn is_checked(&self) -> bool;
  fn set_checked(&self, checked: bool);
  /// False once the row has been filtered out.
  fn is_visible(&self) -> bool;
  fn set_visible(&self, visible: bool);
  /// Shows or hides the delivery-method control.
  /// Rows without one ignore this.
  fn set_send_method_visible(
    &self,
    visible: bool
  );
}

/// Where the running selection count is written.
pub trait CountDisplay {
  fn set_text(&self, text: &str);
}

#[must_use]
pub fn matches_query(
  text: &str,
  query: &str
) -> bool {
  text
    .to_lowercase()
    .contains(&query.to_lowercase())
}

/// Exact match against one comma-separated label.
/// Labels are not trimmed.
#[must_use]
pub fn has_tag(
  tags: &str,
  tag: &str
) -> bool {
  tags.split(',').any(|label| label == tag)
}

#[must_use]
pub fn count_label(count: usize) -> String {
  format!("{count} selected")
}

pub struct ContactSelector<R, D> {
  rows:  Vec<R>,
  count: Option<D>
}

impl<R, D> ContactSelector<R, D>
where
  R: ContactRow,
  D: CountDisplay
{
  pub fn new(
    rows: Vec<R>,
    count: Option<D>
  ) -> Self {
    Self { rows, count }
  }

  pub fn rows(&self) -> &[R] {
    &self.rows
  }

  /// Hides every delivery-method control, whatever
  /// the initial checkbox state.
  pub fn initialize(&self) {
    for row in &self.rows {
      row.set_send_method_visible(false);
    }
  }

  /// Shows rows whose text contains `query`
  /// (case-insensitive) and hides the rest.
  /// Returns how many rows are visible.
  pub fn filter(
    &self,
    query: &str
  ) -> usize {
    let mut visible = 0_usize;
    for row in &self.rows {
      let matched =
        matches_query(&row.text(), query);
      row.set_visible(matched);
      if matched {
        visible += 1;
      }
    }
    visible
  }

  /// Checks every row tagged `tag`, visible or
  /// not, and reveals its delivery-method control.
  /// Other rows keep their state. Returns the
  /// number of tagged rows.
  pub fn select_by_tag(
    &self,
    tag: &str
  ) -> usize {
    let mut matched = 0_usize;
    for row in &self.rows {
      if has_tag(&row.tags(), tag) {
        row.set_checked(true);
        row.set_send_method_visible(true);
        matched += 1;
      }
    }
    self.refresh_count();
    matched
  }

  /// Sets the checkbox of every visible row.
  /// Delivery-method controls are left as they
  /// are. Returns the number of rows touched.
  pub fn select_all(
    &self,
    checked: bool
  ) -> usize {
    let mut touched = 0_usize;
    for row in
      self.rows.iter().filter(|row| {
        row.is_visible()
      })
    {
      row.set_checked(checked);
      touched += 1;
    }
    self.refresh_count();
    touched
  }

  pub fn selected_count(&self) -> usize {
    self
      .rows
      .iter()
      .filter(|row| row.is_checked())
      .count()
  }

  /// Writes `"<n> selected"` to the count display
  /// when there is one.
  pub fn refresh_count(&self) -> usize {
    let count = self.selected_count();
    if let Some(display) = &self.count {
      display.set_text(&count_label(
        count
      ));
    }
    count
  }

  /// Mirrors a checkbox change on row `index`.
  pub fn checkbox_changed(
    &self,
    index: usize
  ) {
    self.refresh_count();
    if let Some(row) = self.rows.get(index)
    {
      row.set_send_method_visible(
        row.is_checked()
      );
    }
  }
}
