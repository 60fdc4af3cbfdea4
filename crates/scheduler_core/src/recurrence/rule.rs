//! Compact recurrence rule codes (`y`, `d <days>`).

use super::error::{RecurrenceError, RecurrenceResult};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Largest accepted `d` interval.
pub const MAX_DAY_INTERVAL: u16 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrenceRule {
    /// `y`: one calendar year per step.
    Yearly,
    /// `d <n>`: `n` days per step, `1..=400`.
    EveryNDays(u16),
}

/// Accepts a day interval in `1..=MAX_DAY_INTERVAL`; `rule` is the text
/// reported on failure.
pub(super) fn checked_interval(days: u64, rule: &str) -> RecurrenceResult<u16> {
    if days == 0 {
        return Err(RecurrenceError::InvalidInterval(rule.to_string()));
    }
    if days > u64::from(MAX_DAY_INTERVAL) {
        return Err(RecurrenceError::IntervalTooLarge {
            interval: days,
            rule: rule.to_string(),
        });
    }
    // Bounded by MAX_DAY_INTERVAL above.
    Ok(days as u16)
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        let mut tokens = rule.split(' ');
        let code = tokens.next().unwrap_or_default();

        match code {
            "y" => {
                if tokens.next().is_some() {
                    return Err(RecurrenceError::InvalidRuleCode(rule.to_string()));
                }
                Ok(Self::Yearly)
            }
            "d" => {
                let invalid = || RecurrenceError::InvalidInterval(rule.to_string());
                let number = tokens.next().ok_or_else(invalid)?;
                if tokens.next().is_some() {
                    return Err(invalid());
                }
                if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let days: u64 = number.parse().map_err(|_| invalid())?;
                checked_interval(days, rule).map(Self::EveryNDays)
            }
            _ => Err(RecurrenceError::InvalidRuleCode(rule.to_string())),
        }
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yearly => f.write_str("y"),
            Self::EveryNDays(days) => write!(f, "d {days}"),
        }
    }
}
