use recording_store_core::StoreError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Serialize)]
struct ApiErrorBody {
    message: String,
    #[serde(rename = "type")]
    error_type: &'static str,
}

/// Error returned by a handler, rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
    pub(crate) error_type: &'static str,
}

impl ApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            error_type: "invalid_request_error",
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            error_type: "server_error",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let (status, error_type, message) = match &err {
            StoreError::NotFound { id, .. } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Recording not found: {}", id),
            ),
            StoreError::InvalidDuration {
                seconds,
                max_seconds,
                ..
            } => (
                StatusCode::BAD_REQUEST,
                "invalid_request_error",
                format!(
                    "Invalid duration {}: must be greater than 0 and at most {} seconds",
                    seconds, max_seconds
                ),
            ),
            StoreError::CaptureBusy { .. } => (
                StatusCode::CONFLICT,
                "device_busy",
                "A recording is already in progress".to_string(),
            ),
            e if e.is_device_fault() => (
                StatusCode::SERVICE_UNAVAILABLE,
                "device_error",
                format!("Audio capture failed: {}", e),
            ),
            e => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "server_error",
                format!("Recording storage failed: {}", e),
            ),
        };

        if status.is_server_error() {
            error!(error = ?err, status = status.as_u16(), "Request failed");
        } else {
            warn!(error = %err, status = status.as_u16(), "Request rejected");
        }

        Self {
            status,
            message,
            error_type,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: ApiErrorBody {
                message: self.message,
                error_type: self.error_type,
            },
        };
        (self.status, Json(body)).into_response()
    }
}
