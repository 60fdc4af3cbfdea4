//! Task domain model.
//!
//! # Responsibility
//! - Define the scheduled task record stored in the `scheduler` table.
//! - Validate title and recurrence fields before persistence.
//!
//! # Invariants
//! - `date` is always a valid `YYYYMMDD` calendar date.
//! - `repeat` is either empty (one-off task) or a valid recurrence rule.

use crate::recurrence::{CalendarDate, RecurrenceError, RecurrenceRule};
use thiserror::Error;

/// SQLite rowid of a task.
pub type TaskId = i64;

/// Maximum title length in characters, matching the `VARCHAR(256)` column.
pub const MAX_TITLE_CHARS: usize = 256;

/// Validation failures for task payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task title is required")]
    EmptyTitle,
    #[error("task title exceeds {MAX_TITLE_CHARS} characters ({0})")]
    TitleTooLong(usize),
    #[error("invalid repeat rule: {0}")]
    InvalidRepeat(RecurrenceError),
}

/// Persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    /// Next due date.
    pub date: CalendarDate,
    pub title: String,
    pub comment: String,
    /// Raw rule code; empty for one-off tasks.
    pub repeat: String,
}

/// Task payload before it has been assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub date: CalendarDate,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl NewTask {
    pub fn new(date: CalendarDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            comment: String::new(),
            repeat: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_repeat(mut self, repeat: impl Into<String>) -> Self {
        self.repeat = repeat.into();
        self
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_fields(&self.title, &self.repeat)
    }

    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_empty()
    }

    /// Attaches a storage-assigned id.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            date: self.date,
            title: self.title,
            comment: self.comment,
            repeat: self.repeat,
        }
    }
}

impl Task {
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_fields(&self.title, &self.repeat)
    }

    /// Parsed recurrence rule, `None` for one-off tasks.
    pub fn rule(&self) -> Result<Option<RecurrenceRule>, TaskValidationError> {
        parse_repeat(&self.repeat)
    }

    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_empty()
    }
}

/// Parses a raw repeat field; empty means non-recurring.
pub fn parse_repeat(repeat: &str) -> Result<Option<RecurrenceRule>, TaskValidationError> {
    if repeat.is_empty() {
        return Ok(None);
    }
    repeat
        .parse()
        .map(Some)
        .map_err(TaskValidationError::InvalidRepeat)
}

fn validate_fields(title: &str, repeat: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    let chars = title.chars().count();
    if chars > MAX_TITLE_CHARS {
        return Err(TaskValidationError::TitleTooLong(chars));
    }
    parse_repeat(repeat)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> CalendarDate {
        value.parse().unwrap()
    }

    #[test]
    fn blank_title_is_rejected() {
        let task = NewTask::new(date("20250101"), "   ");
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let task = NewTask::new(date("20250101"), "x".repeat(MAX_TITLE_CHARS + 1));
        assert_eq!(
            task.validate(),
            Err(TaskValidationError::TitleTooLong(MAX_TITLE_CHARS + 1))
        );
    }

    #[test]
    fn repeat_must_be_empty_or_a_valid_rule() {
        let base = NewTask::new(date("20250101"), "water plants");
        assert!(base.clone().validate().is_ok());
        assert!(base.clone().with_repeat("d 7").validate().is_ok());
        assert!(matches!(
            base.with_repeat("w 1").validate(),
            Err(TaskValidationError::InvalidRepeat(
                RecurrenceError::InvalidRuleCode(_)
            ))
        ));
    }

    #[test]
    fn rule_is_none_for_one_off_tasks() {
        let task = NewTask::new(date("20250101"), "dentist").into_task(7);
        assert_eq!(task.id, 7);
        assert!(!task.is_recurring());
        assert_eq!(task.rule(), Ok(None));

        let yearly = NewTask::new(date("20250101"), "birthday")
            .with_repeat("y")
            .into_task(8);
        assert_eq!(yearly.rule(), Ok(Some(RecurrenceRule::Yearly)));
    }
}
