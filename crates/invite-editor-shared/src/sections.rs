/// Outcome of resolving one independent part of the
/// editor page, such as the template preview or the
/// contact panel.
///
/// A page may carry either part without the other, so
/// each one is resolved and mounted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<T, E> {
  Ready(T),
  Absent,
  Broken(E)
}

impl<T, E> Section<T, E> {
  /// `Ok(None)` means the page has no markup for this
  /// part at all.
  pub fn from_resolved(
    resolved: Result<Option<T>, E>
  ) -> Self {
    match resolved {
      | Ok(Some(value)) => Self::Ready(value),
      | Ok(None) => Self::Absent,
      | Err(error) => Self::Broken(error)
    }
  }

  pub fn map<U>(
    self,
    f: impl FnOnce(T) -> U
  ) -> Section<U, E> {
    match self {
      | Self::Ready(value) => {
        Section::Ready(f(value))
      }
      | Self::Absent => Section::Absent,
      | Self::Broken(error) => {
        Section::Broken(error)
      }
    }
  }

  pub fn is_ready(&self) -> bool {
    matches!(self, Self::Ready(_))
  }

  pub fn ready(self) -> Option<T> {
    match self {
      | Self::Ready(value) => Some(value),
      | _ => None
    }
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;

  #[test]
  fn broken_preview_leaves_contacts_mounted() {
    let mounted = Cell::new(0);
    let preview: Section<&str, String> =
      Section::from_resolved(Err(
        "missing element: #title".to_string()
      ));
    let contacts: Section<&str, String> =
      Section::from_resolved(Ok(Some(
        "contacts"
      )));

    let preview = preview.map(|_| {
      mounted.set(mounted.get() + 1);
    });
    let contacts = contacts.map(|name| {
      mounted.set(mounted.get() + 1);
      name.len()
    });

    assert_eq!(
      preview,
      Section::Broken(
        "missing element: #title".to_string()
      )
    );
    assert_eq!(contacts.ready(), Some(8));
    assert_eq!(mounted.get(), 1);
  }

  #[test]
  fn missing_markup_is_absent_not_broken() {
    let section: Section<u8, String> =
      Section::from_resolved(Ok(None));
    assert_eq!(section, Section::Absent);
    assert!(!section.is_ready());
    assert_eq!(section.ready(), None);
  }
}
