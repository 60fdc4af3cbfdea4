//! Wire shapes for the JSON task API.
//!
//! Task ids travel as strings in responses; requests accept a string or a
//! number.

use super::error::ApiError;
use scheduler_core::{Task, TaskId, TaskInput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdField {
    Number(TaskId),
    Text(String),
}

/// Request body for `POST /api/task` and `PUT /api/task`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskPayload {
    pub id: Option<IdField>,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl TaskPayload {
    pub fn input(&self) -> TaskInput {
        TaskInput {
            date: self.date.clone(),
            title: self.title.clone(),
            comment: self.comment.clone(),
            repeat: self.repeat.clone(),
        }
    }

    pub fn task_id(&self) -> Result<TaskId, ApiError> {
        match &self.id {
            Some(IdField::Number(id)) => Ok(*id),
            Some(IdField::Text(text)) => parse_task_id(Some(text.as_str())),
            None => parse_task_id(None),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NextDateQuery {
    pub now: String,
    pub date: String,
    pub repeat: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: String,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            date: task.date.to_string(),
            title: task.title,
            comment: task.comment,
            repeat: task.repeat,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskListView {
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedView {
    pub id: String,
}

/// Parses a task id from query or body text.
pub fn parse_task_id(raw: Option<&str>) -> Result<TaskId, ApiError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ApiError::bad_request("task id is required"));
    }
    raw.parse::<TaskId>()
        .map_err(|_| ApiError::bad_request(format!("invalid task id `{raw}`")))
}
