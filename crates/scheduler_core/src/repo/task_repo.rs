//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/get/update/delete/list over the `scheduler` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Listing is ordered by `date ASC, id ASC`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::task::{NewTask, Task, TaskId, TaskValidationError};
use crate::recurrence::CalendarDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use thiserror::Error;

const TASKS_TABLE: &str = "scheduler";
const REQUIRED_COLUMNS: &[&str] = &["id", "date", "title", "comment", "repeat"];

const TASK_SELECT_SQL: &str = "SELECT id, date, title, comment, repeat FROM scheduler";

/// Default and maximum number of tasks returned by one list call.
pub const TASK_LIST_LIMIT: u32 = 50;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("invalid persisted task data: {0}")]
    InvalidData(String),
    #[error("connection schema version {actual_version} is behind required {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Row filter for [`TaskListQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    /// Tasks due on exactly this date.
    OnDate(CalendarDate),
    /// Substring match against title or comment.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListQuery {
    pub filter: TaskFilter,
    /// Clamped to `1..=TASK_LIST_LIMIT`.
    pub limit: u32,
}

impl Default for TaskListQuery {
    fn default() -> Self {
        Self {
            filter: TaskFilter::All,
            limit: TASK_LIST_LIMIT,
        }
    }
}

/// Storage capability consumed by the task service.
pub trait TaskRepository {
    fn insert_task(&self, task: &NewTask) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a connection after checking that migrations have been applied.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is behind.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match the migrated shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        ensure_schema(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO scheduler (date, title, comment, repeat)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                task.date.to_string(),
                task.title.as_str(),
                task.comment.as_str(),
                task.repeat.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE scheduler
             SET date = ?1, title = ?2, comment = ?3, repeat = ?4
             WHERE id = ?5;",
            params![
                task.date.to_string(),
                task.title.as_str(),
                task.comment.as_str(),
                task.repeat.as_str(),
                task.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM scheduler WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = String::from(TASK_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        match &query.filter {
            TaskFilter::All => {}
            TaskFilter::OnDate(date) => {
                sql.push_str(" WHERE date = ?");
                bind_values.push(Value::Text(date.to_string()));
            }
            TaskFilter::Text(needle) => {
                sql.push_str(
                    " WHERE title LIKE ?1 ESCAPE '\\' OR comment LIKE ?1 ESCAPE '\\'",
                );
                bind_values.push(Value::Text(format!("%{}%", escape_like(needle))));
            }
        }

        sql.push_str(" ORDER BY date ASC, id ASC LIMIT ");
        sql.push_str(&query.limit.clamp(1, TASK_LIST_LIMIT).to_string());

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

fn ensure_schema(conn: &Connection) -> RepoResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({TASKS_TABLE});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(TASKS_TABLE));
    }

    for &column in REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: TASKS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;
    let date_text: String = row.get("date")?;
    let date = date_text.parse::<CalendarDate>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in scheduler.date for id {id}"
        ))
    })?;

    let task = Task {
        id,
        date,
        title: row.get("title")?,
        comment: row.get("comment")?,
        repeat: row.get("repeat")?,
    };
    task.validate().map_err(|err| {
        RepoError::InvalidData(format!("task {id} failed validation: {err}"))
    })?;
    Ok(task)
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
