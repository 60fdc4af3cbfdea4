//! Error types for next-occurrence computation.

use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Which engine input a date error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// Reference date ("now").
    Now,
    /// Anchor date the recurrence is counted from.
    Anchor,
    /// Free-standing date text not tied to an engine argument.
    Input,
}

impl Display for DateField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Now => f.write_str("now"),
            Self::Anchor => f.write_str("date"),
            Self::Input => f.write_str("input"),
        }
    }
}

/// Failures of the recurrence engine.
///
/// Every variant is a caller fault: retrying with the same input yields the
/// same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("invalid `{field}` value `{value}`: expected a YYYYMMDD date")]
    InvalidDate { field: DateField, value: String },

    #[error("invalid repeat code in `{0}`: expected `y` or `d <days>`")]
    InvalidRuleCode(String),

    #[error("invalid day interval in `{0}`: expected a positive integer")]
    InvalidInterval(String),

    #[error("day interval {interval} in `{rule}` exceeds the maximum of 400")]
    IntervalTooLarge { interval: u64, rule: String },

    #[error("next occurrence is outside the supported calendar range")]
    OutOfRange,
}

pub type RecurrenceResult<T> = Result<T, RecurrenceError>;
