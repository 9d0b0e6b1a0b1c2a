//! Time codec and wall-clock minute source.
//!
//! # Responsibility
//! - Convert 12-hour user input into the canonical 24-hour `"HH:MM"` form.
//! - Report the local wall clock at minute resolution for due checks.
//!
//! # Invariants
//! - Only the canonical form ever leaves this module; rejected input never
//!   reaches the store.
//! - Seconds are not modeled anywhere.

use chrono::{Local, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepted user input shape, e.g. `"02:30 PM"` or `"2:30 pm"`.
const TWELVE_HOUR_FORMAT: &str = "%I:%M %p";
/// Canonical persisted shape, e.g. `"14:30"`.
const CANONICAL_FORMAT: &str = "%H:%M";

pub type ClockResult<T> = Result<T, TimeParseError>;

/// Time-input parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// Input does not match the 12-hour clock shape, or its fields are out
    /// of range (hour outside 1-12, minute outside 0-59, missing AM/PM).
    InvalidTimeFormat(String),
}

impl Display for TimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeFormat(value) => {
                write!(f, "invalid time `{value}`: expected HH:MM AM/PM")
            }
        }
    }
}

impl Error for TimeParseError {}

/// Parses a 12-hour clock string into the canonical 24-hour `"HH:MM"` form.
///
/// Input is trimmed first; the AM/PM designator is case-insensitive and the
/// hour may omit its leading zero (`"2:15 PM"` -> `"14:15"`, `"12:05 am"` ->
/// `"00:05"`).
///
/// # Errors
/// - [`TimeParseError::InvalidTimeFormat`] for any other shape. The caller
///   must surface this to the user and must not persist the task.
pub fn parse_12h(input: &str) -> ClockResult<String> {
    let trimmed = input.trim();
    let parsed = NaiveTime::parse_from_str(trimmed, TWELVE_HOUR_FORMAT)
        .map_err(|_| TimeParseError::InvalidTimeFormat(trimmed.to_string()))?;
    Ok(parsed.format(CANONICAL_FORMAT).to_string())
}

/// Returns the local wall clock as a canonical `"HH:MM"` string.
///
/// One reminder tick compares every stored task against exactly one value
/// from this function, so all matches within a tick see the same minute.
pub fn current_minute() -> String {
    Local::now().format(CANONICAL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{current_minute, parse_12h, TimeParseError};
    use crate::model::task::Task;

    #[test]
    fn converts_valid_afternoon_times() {
        assert_eq!(parse_12h("02:30 PM").unwrap(), "14:30");
        assert_eq!(parse_12h("2:15 PM").unwrap(), "14:15");
        assert_eq!(parse_12h("11:59 pm").unwrap(), "23:59");
    }

    #[test]
    fn converts_valid_morning_times() {
        assert_eq!(parse_12h("02:30 AM").unwrap(), "02:30");
        assert_eq!(parse_12h("9:05 am").unwrap(), "09:05");
    }

    #[test]
    fn handles_noon_and_midnight() {
        assert_eq!(parse_12h("12:00 AM").unwrap(), "00:00");
        assert_eq!(parse_12h("12:30 AM").unwrap(), "00:30");
        assert_eq!(parse_12h("12:00 PM").unwrap(), "12:00");
        assert_eq!(parse_12h("12:30 PM").unwrap(), "12:30");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_12h("  7:45 AM  ").unwrap(), "07:45");
    }

    #[test]
    fn rejects_out_of_range_fields() {
        for bad in ["25:99 AM", "0:30 AM", "13:00 PM", "10:60 AM"] {
            let err = parse_12h(bad).unwrap_err();
            assert_eq!(err, TimeParseError::InvalidTimeFormat(bad.to_string()));
        }
    }

    #[test]
    fn rejects_missing_designator_and_garbage() {
        for bad in ["14:30", "2:30", "", "soon", "02:30 XM", "PM 02:30"] {
            assert!(parse_12h(bad).is_err(), "`{bad}` should not parse");
        }
    }

    #[test]
    fn error_message_names_the_expected_shape() {
        let err = parse_12h("nope").unwrap_err();
        assert!(err.to_string().contains("HH:MM AM/PM"));
    }

    #[test]
    fn current_minute_is_store_valid() {
        // The loop writes nothing derived from this value, but every due
        // comparison uses it; it must agree with the persisted form.
        let minute = current_minute();
        assert!(Task::new("probe", minute).validate().is_ok());
    }
}
