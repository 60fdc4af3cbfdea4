//! `GET /api/nextdate`: plain-text access to the recurrence engine.

use super::dto::NextDateQuery;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::debug;

/// Responds with the next `YYYYMMDD` date as the whole body, or 400 with the
/// engine's message. A blank `now` means today.
pub async fn next_date(
    State(state): State<AppState>,
    Query(query): Query<NextDateQuery>,
) -> Response {
    let now = if query.now.is_empty() {
        match state.today() {
            Ok(today) => today.to_string(),
            Err(err) => return err.into_response(),
        }
    } else {
        query.now
    };

    match scheduler_core::next_date(&now, &query.date, &query.repeat) {
        Ok(date) => date.into_response(),
        Err(err) => {
            debug!(
                "event=next_date module=api status=rejected now={} date={} repeat={} error={}",
                now, query.date, query.repeat, err
            );
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
    }
}
