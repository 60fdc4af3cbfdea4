//! Shared request state: the database connection and the clock.
//!
//! # Invariants
//! - Only one request touches the connection at a time.
//! - Repository work runs on the blocking pool, never on a runtime worker.

use crate::api::error::ApiError;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use scheduler_core::{CalendarDate, ServiceResult, SqliteTaskRepository, TaskService};
use std::sync::{Arc, Mutex};

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    clock: Clock,
}

impl AppState {
    /// Wraps a migrated connection, using the local calendar date as "today".
    pub fn new(conn: Connection) -> Self {
        Self::with_clock(conn, || Local::now().date_naive())
    }

    /// Wraps a migrated connection with a caller-provided clock.
    pub fn with_clock(
        conn: Connection,
        clock: impl Fn() -> NaiveDate + Send + Sync + 'static,
    ) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            clock: Arc::new(clock),
        }
    }

    pub fn today(&self) -> Result<CalendarDate, ApiError> {
        CalendarDate::try_from((self.clock)())
            .map_err(|err| ApiError::internal(format!("clock date unusable: {err}")))
    }

    /// Runs `work` against a task service bound to the shared connection.
    pub async fn with_service<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&TaskService<SqliteTaskRepository<'conn>>) -> ServiceResult<T>
            + Send
            + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| ApiError::internal("database connection lock poisoned"))?;
            let repo = SqliteTaskRepository::try_new(&conn)
                .map_err(|err| ApiError::internal(format!("database not ready: {err}")))?;
            work(&TaskService::new(repo)).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::internal(format!("storage task failed: {err}")))?
    }
}
