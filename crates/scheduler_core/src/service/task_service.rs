//! Task use-case service.
//!
//! # Responsibility
//! - Normalize raw task input (default date, past-date roll-forward).
//! - Run the completion workflow: reschedule recurring tasks, drop one-off ones.
//! - Translate free-text search into repository filters.
//!
//! # Invariants
//! - "Today" is always an explicit argument; the service never reads a clock.
//! - A stored task date is never before the `today` it was written with,
//!   unless the caller submitted a future date explicitly.
//! - Service layer remains storage-agnostic.

use crate::model::task::{parse_repeat, NewTask, Task, TaskId, TaskValidationError};
use crate::recurrence::{next_occurrence, CalendarDate, DateField, RecurrenceError};
use crate::repo::task_repo::{RepoError, TaskFilter, TaskListQuery, TaskRepository};
use chrono::NaiveDate;
use log::{debug, info};
use thiserror::Error;

/// Date format accepted by the list search box.
const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    #[error(transparent)]
    InvalidDate(RecurrenceError),
    #[error(transparent)]
    Recurrence(RecurrenceError),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error(transparent)]
    Repo(RepoError),
}

impl ServiceError {
    /// Whether the failure was caused by the request rather than storage.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Repo(_))
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Raw task fields as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    /// `YYYYMMDD`, or blank for today.
    pub date: String,
    pub title: String,
    pub comment: String,
    /// Rule code, or blank for a one-off task.
    pub repeat: String,
}

/// Result of marking a task done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Recurring task moved to its next occurrence.
    Rescheduled(CalendarDate),
    /// One-off task deleted.
    Removed,
}

/// Use-case service over an injected [`TaskRepository`].
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates, normalizes and stores a new task.
    ///
    /// # Errors
    /// - `Validation` for a blank title or malformed repeat rule.
    /// - `InvalidDate` for a non-blank date that is not `YYYYMMDD`.
    pub fn create_task(&self, input: &TaskInput, today: CalendarDate) -> ServiceResult<TaskId> {
        let task = normalize_input(input, today)?;
        let id = self.repo.insert_task(&task)?;
        info!(
            "event=task_create module=service status=ok id={} date={} recurring={}",
            id,
            task.date,
            task.is_recurring()
        );
        Ok(id)
    }

    pub fn get_task(&self, id: TaskId) -> ServiceResult<Task> {
        self.repo.get_task(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Replaces all fields of an existing task using create-time rules.
    pub fn update_task(
        &self,
        id: TaskId,
        input: &TaskInput,
        today: CalendarDate,
    ) -> ServiceResult<()> {
        let task = normalize_input(input, today)?.into_task(id);
        self.repo.update_task(&task)?;
        info!(
            "event=task_update module=service status=ok id={} date={} recurring={}",
            id,
            task.date,
            task.is_recurring()
        );
        Ok(())
    }

    /// Marks a task done.
    ///
    /// Recurring tasks advance to the first occurrence after `today`,
    /// counted from their current date. One-off tasks are deleted.
    pub fn complete_task(&self, id: TaskId, today: CalendarDate) -> ServiceResult<Completion> {
        let mut task = self.get_task(id)?;

        let Some(rule) = task.rule()? else {
            self.repo.delete_task(id)?;
            info!("event=task_complete module=service status=ok id={id} outcome=removed");
            return Ok(Completion::Removed);
        };

        task.date = next_occurrence(today, task.date, rule).map_err(ServiceError::Recurrence)?;
        self.repo.update_task(&task)?;
        info!(
            "event=task_complete module=service status=ok id={} outcome=rescheduled date={}",
            id, task.date
        );
        Ok(Completion::Rescheduled(task.date))
    }

    pub fn delete_task(&self, id: TaskId) -> ServiceResult<()> {
        self.repo.delete_task(id)?;
        info!("event=task_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Lists upcoming tasks, optionally filtered by a search string.
    ///
    /// `DD.MM.YYYY` searches by date; any other non-blank text matches
    /// title or comment.
    pub fn list_tasks(&self, search: Option<&str>) -> ServiceResult<Vec<Task>> {
        let query = TaskListQuery {
            filter: search.map_or(TaskFilter::All, parse_search),
            ..TaskListQuery::default()
        };
        debug!("event=task_list module=service filter={:?}", query.filter);
        Ok(self.repo.list_tasks(&query)?)
    }
}

/// Maps list search text to a repository filter.
pub fn parse_search(search: &str) -> TaskFilter {
    let search = search.trim();
    if search.is_empty() {
        return TaskFilter::All;
    }
    NaiveDate::parse_from_str(search, SEARCH_DATE_FORMAT)
        .ok()
        .and_then(|date| CalendarDate::try_from(date).ok())
        .map_or_else(|| TaskFilter::Text(search.to_string()), TaskFilter::OnDate)
}

fn normalize_input(input: &TaskInput, today: CalendarDate) -> ServiceResult<NewTask> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(TaskValidationError::EmptyTitle.into());
    }

    let date = if input.date.trim().is_empty() {
        today
    } else {
        CalendarDate::parse_field(DateField::Anchor, &input.date)
            .map_err(ServiceError::InvalidDate)?
    };

    let rule = parse_repeat(&input.repeat)?;

    let date = match rule {
        _ if date >= today => date,
        None => today,
        Some(rule) => next_occurrence(today, date, rule).map_err(ServiceError::Recurrence)?,
    };

    let task = NewTask {
        date,
        title: title.to_string(),
        comment: input.comment.clone(),
        repeat: input.repeat.clone(),
    };
    task.validate()?;
    Ok(task)
}
