//! Next-occurrence engine for recurring tasks.
//!
//! # Responsibility
//! - Compute the first occurrence strictly after a reference date.
//! - Validate date and rule inputs and report which one failed.
//!
//! # Invariants
//! - Pure: no clock reads, no I/O, no shared state. The caller supplies `now`.
//! - The result `r` satisfies `r > now` and `r = anchor + k * step` for the
//!   smallest `k >= 1`.
//! - Day rules use closed-form advancement, so cost does not grow with the
//!   gap between `anchor` and `now`.

mod date;
mod error;
mod rule;

pub use date::{CalendarDate, DATE_FORMAT};
pub use error::{DateField, RecurrenceError, RecurrenceResult};
pub use rule::{RecurrenceRule, MAX_DAY_INTERVAL};

/// String-level entry point used by the HTTP and storage collaborators.
///
/// Validation order is `now`, `anchor`, then `rule`.
///
/// # Errors
/// - `InvalidDate` when `now` or `anchor` is not a valid `YYYYMMDD` date.
/// - `InvalidRuleCode`, `InvalidInterval` or `IntervalTooLarge` for bad rules.
pub fn next_date(now: &str, anchor: &str, rule: &str) -> RecurrenceResult<String> {
    let now = CalendarDate::parse_field(DateField::Now, now)?;
    let anchor = CalendarDate::parse_field(DateField::Anchor, anchor)?;
    let rule: RecurrenceRule = rule.parse()?;
    next_occurrence(now, anchor, rule).map(|date| date.to_string())
}

/// Returns the first `anchor + k * step` (`k >= 1`) strictly after `now`.
///
/// Day intervals are re-checked here, so a hand-built `EveryNDays` outside
/// `1..=400` fails the same way a parsed one does.
pub fn next_occurrence(
    now: CalendarDate,
    anchor: CalendarDate,
    rule: RecurrenceRule,
) -> RecurrenceResult<CalendarDate> {
    match rule {
        RecurrenceRule::Yearly => advance_yearly(now, anchor),
        RecurrenceRule::EveryNDays(days) => advance_days(now, anchor, days),
    }
}

fn advance_yearly(now: CalendarDate, anchor: CalendarDate) -> RecurrenceResult<CalendarDate> {
    let mut cursor = anchor;
    loop {
        cursor = cursor
            .checked_add_year()
            .ok_or(RecurrenceError::OutOfRange)?;
        if cursor > now {
            return Ok(cursor);
        }
    }
}

fn advance_days(
    now: CalendarDate,
    anchor: CalendarDate,
    days: u16,
) -> RecurrenceResult<CalendarDate> {
    let rule_text = RecurrenceRule::EveryNDays(days).to_string();
    let step = u64::from(rule::checked_interval(u64::from(days), &rule_text)?);
    let elapsed = now.days_since(anchor);
    // anchor > now: a single step already lands after now.
    let steps = if elapsed < 0 {
        1
    } else {
        elapsed.unsigned_abs() / step + 1
    };
    steps
        .checked_mul(step)
        .and_then(|offset| anchor.checked_add_days(offset))
        .ok_or(RecurrenceError::OutOfRange)
}
