//! Task CRUD and completion handlers.

use super::dto::{
    parse_task_id, CreatedView, IdQuery, SearchQuery, TaskListView, TaskPayload, TaskView,
};
use super::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};

type JsonBody = Result<Json<TaskPayload>, JsonRejection>;

/// `POST /api/task`
pub async fn create_task(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<Json<CreatedView>, ApiError> {
    let payload = read_payload(body)?;
    let today = state.today()?;
    let input = payload.input();
    let id = state
        .with_service(move |service| service.create_task(&input, today))
        .await?;
    Ok(Json(CreatedView { id: id.to_string() }))
}

/// `GET /api/task?id=`
pub async fn get_task(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<TaskView>, ApiError> {
    let id = parse_task_id(query.id.as_deref())?;
    let task = state.with_service(move |service| service.get_task(id)).await?;
    Ok(Json(task.into()))
}

/// `PUT /api/task`
pub async fn update_task(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<Json<Value>, ApiError> {
    let payload = read_payload(body)?;
    let id = payload.task_id()?;
    let today = state.today()?;
    let input = payload.input();
    state
        .with_service(move |service| service.update_task(id, &input, today))
        .await?;
    Ok(Json(json!({})))
}

/// `DELETE /api/task?id=`
pub async fn delete_task(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_task_id(query.id.as_deref())?;
    state
        .with_service(move |service| service.delete_task(id))
        .await?;
    Ok(Json(json!({})))
}

/// `POST /api/task/done?id=`
///
/// Recurring tasks move to their next date; one-off tasks are deleted.
pub async fn complete_task(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_task_id(query.id.as_deref())?;
    let today = state.today()?;
    state
        .with_service(move |service| service.complete_task(id, today))
        .await?;
    Ok(Json(json!({})))
}

/// `GET /api/tasks?search=`
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<TaskListView>, ApiError> {
    let tasks = state
        .with_service(move |service| service.list_tasks(query.search.as_deref()))
        .await?;
    Ok(Json(TaskListView {
        tasks: tasks.into_iter().map(TaskView::from).collect(),
    }))
}

fn read_payload(body: JsonBody) -> Result<TaskPayload, ApiError> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| ApiError::bad_request(format!("invalid request body: {rejection}")))
}
