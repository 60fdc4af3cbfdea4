//! Core domain logic for the task scheduler.
//! This crate owns the recurrence engine, the task model and its storage.

pub mod db;
pub mod logging;
pub mod model;
pub mod recurrence;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{NewTask, Task, TaskId, TaskValidationError};
pub use recurrence::{
    next_date, next_occurrence, CalendarDate, DateField, RecurrenceError, RecurrenceRule,
};
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskFilter, TaskListQuery, TaskRepository,
};
pub use service::task_service::{
    Completion, ServiceError, ServiceResult, TaskInput, TaskService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
