//! Day-granularity calendar date in `YYYYMMDD` form.
//!
//! # Invariants
//! - Text form is exactly eight ASCII digits.
//! - The value is always a valid proleptic Gregorian date with a 4-digit year.

use super::error::{DateField, RecurrenceError, RecurrenceResult};
use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Canonical storage and wire format.
pub const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from year/month/day, returning `None` for invalid dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses `value` and attributes a failure to `field`.
    pub fn parse_field(field: DateField, value: &str) -> RecurrenceResult<Self> {
        parse_compact(value).ok_or_else(|| RecurrenceError::InvalidDate {
            field,
            value: value.to_string(),
        })
    }

    /// Adds `days`, returning `None` past the 4-digit year range.
    pub fn checked_add_days(self, days: u64) -> Option<Self> {
        self.0
            .checked_add_days(Days::new(days))
            .and_then(Self::from_naive)
    }

    /// Adds one calendar year using chrono month arithmetic.
    ///
    /// Feb 29 lands on Feb 28 when the following year is not a leap year.
    pub fn checked_add_year(self) -> Option<Self> {
        self.0
            .checked_add_months(Months::new(12))
            .and_then(Self::from_naive)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: Self) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    fn from_naive(date: NaiveDate) -> Option<Self> {
        (date.year() <= 9999).then_some(Self(date))
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = RecurrenceError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_ymd(value.year(), value.month(), value.day()).ok_or(RecurrenceError::OutOfRange)
    }
}

impl FromStr for CalendarDate {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field(DateField::Input, s)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

fn parse_compact(value: &str) -> Option<CalendarDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    CalendarDate::from_ymd(year, month, day)
}
