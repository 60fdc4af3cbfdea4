//! JSON error envelope (`{"error": "..."}`) for API handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use scheduler_core::ServiceError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// Server fault. The detail is logged, not returned to the client.
    pub fn internal(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        error!("event=http_error module=api status=error error_code=internal error={detail}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        if !value.is_client_error() {
            return Self::internal(value.to_string());
        }
        if let ServiceError::NotFound(_) = value {
            return Self::not_found(value.to_string());
        }
        warn!("event=http_error module=api status=rejected error={value}");
        Self::bad_request(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
