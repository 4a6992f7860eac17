use chrono::{
  NaiveDate,
  NaiveDateTime,
  NaiveTime
};

/// Formats an `<input type="date">` value
/// (`YYYY-MM-DD`) as `January 5, 2025`.
///
/// Empty input gives an empty string. Input that is
/// not a calendar date is returned unchanged.
#[must_use]
pub fn format_date(raw: &str) -> String {
  if raw.is_empty() {
    return String::new();
  }

  match NaiveDate::parse_from_str(
    raw, "%Y-%m-%d"
  ) {
    | Ok(date) => {
      date
        .format("%B %-d, %Y")
        .to_string()
    }
    | Err(_) => raw.to_string()
  }
}

/// Formats an `<input type="time">` value
/// (`HH:MM`, 24-hour) as `1:05 PM`.
///
/// Hour 0 maps to 12. Minutes are copied as typed.
/// Empty input gives an empty string and input
/// without a numeric hour is returned unchanged.
#[must_use]
pub fn format_time(raw: &str) -> String {
  if raw.is_empty() {
    return String::new();
  }

  let Some((hour, minute)) =
    raw.split_once(':')
  else {
    return raw.to_string();
  };
  let Ok(hour) =
    hour.trim().parse::<u32>()
  else {
    return raw.to_string();
  };

  let suffix =
    if hour >= 12 { "PM" } else { "AM" };
  let hour12 = match hour % 12 {
    | 0 => 12,
    | other => other
  };

  format!("{hour12}:{minute} {suffix}")
}

/// Date as printed in sent invitations:
/// `January 05, 2025`, day zero-padded.
///
/// Accepts a bare date or a date-time. Anything else,
/// empty input included, is returned unchanged.
#[must_use]
pub fn format_guest_date(
  raw: &str
) -> String {
  let date = NaiveDate::parse_from_str(
    raw, "%Y-%m-%d"
  )
  .or_else(|_| {
    raw
      .parse::<NaiveDateTime>()
      .map(|stamp| stamp.date())
  });
  match date {
    | Ok(date) => {
      date
        .format("%B %d, %Y")
        .to_string()
    }
    | Err(_) => raw.to_string()
  }
}

/// Time as printed in sent invitations:
/// `01:05 PM`, hour zero-padded.
///
/// Only `HH:MM` is accepted. Anything else, empty
/// input included, is returned unchanged.
#[must_use]
pub fn format_guest_time(
  raw: &str
) -> String {
  match NaiveTime::parse_from_str(
    raw, "%H:%M"
  ) {
    | Ok(time) => {
      time
        .format("%I:%M %p")
        .to_string()
    }
    | Err(_) => raw.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_long_dates() {
    assert_eq!(
      format_date("2025-01-05"),
      "January 5, 2025"
    );
    assert_eq!(
      format_date("2024-12-25"),
      "December 25, 2024"
    );
    assert_eq!(
      format_date("2024-02-29"),
      "February 29, 2024"
    );
  }

  #[test]
  fn empty_date_is_empty() {
    assert_eq!(format_date(""), "");
  }

  #[test]
  fn malformed_date_passes_through() {
    assert_eq!(
      format_date("next friday"),
      "next friday"
    );
    assert_eq!(
      format_date("2025-02-30"),
      "2025-02-30"
    );
  }

  #[test]
  fn formats_twelve_hour_clock() {
    assert_eq!(
      format_time("00:30"),
      "12:30 AM"
    );
    assert_eq!(
      format_time("13:05"),
      "1:05 PM"
    );
    assert_eq!(
      format_time("12:00"),
      "12:00 PM"
    );
    assert_eq!(
      format_time("09:45"),
      "9:45 AM"
    );
  }

  #[test]
  fn empty_time_is_empty() {
    assert_eq!(format_time(""), "");
  }

  #[test]
  fn time_without_hour_passes_through() {
    assert_eq!(
      format_time("noon"),
      "noon"
    );
    assert_eq!(
      format_time("ab:30"),
      "ab:30"
    );
  }

  #[test]
  fn guest_formats_are_zero_padded() {
    assert_eq!(
      format_guest_date("2025-01-05"),
      "January 05, 2025"
    );
    assert_eq!(
      format_guest_date(
        "2025-01-05T18:30:00"
      ),
      "January 05, 2025"
    );
    assert_eq!(
      format_guest_time("13:05"),
      "01:05 PM"
    );
    assert_eq!(
      format_guest_time("00:30"),
      "12:30 AM"
    );
  }

  #[test]
  fn guest_formats_pass_through_unparsed_input()
  {
    assert_eq!(format_guest_date(""), "");
    assert_eq!(
      format_guest_date("next friday"),
      "next friday"
    );
    assert_eq!(format_guest_time(""), "");
    assert_eq!(
      format_guest_time("25:00"),
      "25:00"
    );
    assert_eq!(
      format_guest_time("13:05:00"),
      "13:05:00"
    );
  }
}
