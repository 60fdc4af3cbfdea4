//! Route table and request logging.
//!
//! # Routes
//! - `GET /api/nextdate` plain-text next occurrence
//! - `GET|POST|PUT|DELETE /api/task` single task CRUD
//! - `POST /api/task/done` completion workflow
//! - `GET /api/tasks` upcoming tasks with optional search
//! - everything else is served from the web directory

pub mod dto;
pub mod error;
pub mod next_date;
pub mod task;

use crate::state::AppState;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use log::{info, warn};
use std::path::Path;
use std::time::Instant;
use tower_http::services::ServeDir;

pub fn router(state: AppState, web_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/nextdate", get(next_date::next_date))
        .route(
            "/api/task",
            get(task::get_task)
                .post(task::create_task)
                .put(task::update_task)
                .delete(task::delete_task),
        )
        .route("/api/task/done", post(task::complete_task))
        .route("/api/tasks", get(task::list_tasks))
        .fallback_service(ServeDir::new(web_dir.as_ref()))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = started_at.elapsed().as_millis();
    if status.is_server_error() {
        warn!(
            "event=http_request module=api status=error method={method} path={path} http_status={} duration_ms={duration_ms}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=api status=ok method={method} path={path} http_status={} duration_ms={duration_ms}",
            status.as_u16()
        );
    }
    response
}
