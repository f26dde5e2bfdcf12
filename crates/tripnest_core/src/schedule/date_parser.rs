//! Flexible calendar-date parser.
//!
//! # Responsibility
//! - Parse `DD/MM/YYYY` input as typed by users.
//! - Fall back to a small set of generic machine and English formats.
//!
//! # Invariants
//! - Parsing is total: every input maps to `Valid(date)` or `Invalid`.
//! - Out-of-range components never roll over (`31/02/2025` is `Invalid`).
//! - Day/month/year input with a year below 1 is `Invalid`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DAY_MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*/\s*(\d+)\s*/\s*(\d+)\s*$").expect("valid day/month/year regex")
});

/// Years below this are typos (`01/01/0`), not dates.
const MIN_YEAR: i32 = 1;

const GENERIC_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const GENERIC_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Outcome of parsing user-entered date text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsedDate {
    Valid(NaiveDate),
    Invalid,
}

impl ParsedDate {
    /// Returns the calendar date when parsing succeeded.
    pub fn valid(self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(date),
            Self::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

impl From<NaiveDate> for ParsedDate {
    fn from(value: NaiveDate) -> Self {
        Self::Valid(value)
    }
}

/// Parses user-entered date text.
///
/// Rules:
/// - Three numeric `/`-separated parts are read as day/month/year, month
///   1-based.
/// - Anything else goes through the generic formats in order.
/// - A result that is not a real calendar date is `Invalid`.
pub fn parse_date(text: &str) -> ParsedDate {
    if let Some(caps) = DAY_MONTH_YEAR_RE.captures(text) {
        return day_month_year(&caps[1], &caps[2], &caps[3])
            .map_or(ParsedDate::Invalid, ParsedDate::Valid);
    }

    parse_generic(text.trim()).map_or(ParsedDate::Invalid, ParsedDate::Valid)
}

/// Returns the first instant of a calendar day.
///
/// Datetime comparisons against a schedule date use this instant.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn day_month_year(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day = day.parse::<u32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    let year = year.parse::<i32>().ok().filter(|year| *year >= MIN_YEAR)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_generic(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc2822(text) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }

    GENERIC_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|datetime| datetime.date())
        .or_else(|| {
            GENERIC_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::{day_month_year, parse_generic, start_of_day};
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn day_month_year_rejects_overflowing_components() {
        assert!(day_month_year("31", "02", "2025").is_none());
        assert!(day_month_year("1", "13", "2025").is_none());
        assert!(day_month_year("0", "1", "2025").is_none());
        assert!(day_month_year("1", "1", "99999999999").is_none());
        assert!(day_month_year("1", "1", "0").is_none());
        assert!(day_month_year("1", "1", "1").is_some());
    }

    #[test]
    fn generic_parse_rejects_empty_input() {
        assert!(parse_generic("").is_none());
    }

    #[test]
    fn start_of_day_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date");
        let instant = start_of_day(date);
        assert_eq!(instant.date(), date);
        assert_eq!(instant.hour(), 0);
        assert_eq!(instant.minute(), 0);
        assert_eq!(instant.second(), 0);
    }
}
