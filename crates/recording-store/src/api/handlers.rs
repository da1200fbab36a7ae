//! Request handlers for the recording endpoints.
//!
//! Filesystem work and capture both block, so every store call is moved onto
//! the blocking pool. A capture in progress never stalls list, fetch or
//! delete requests.

use crate::api::{ApiError, ApiState, MessageResponse, RecordRequest};

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use recording_store_core::{CoreResult, Recording};
use tracing::{info, instrument};

const WAV_CONTENT_TYPE: &str = "audio/wav";

async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> CoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("Blocking task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// `GET /api/recordings`
#[instrument(skip(state))]
pub(crate) async fn list_recordings(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Recording>>, ApiError> {
    let store = state.store.clone();
    let recordings = run_blocking(move || store.list()).await?;
    Ok(Json(recordings))
}

/// `GET /api/recordings/{id}`
#[instrument(skip(state))]
pub(crate) async fn get_recording(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let store = state.store.clone();
    let bytes = run_blocking(move || store.read(&id)).await?;

    let mut response = bytes.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(WAV_CONTENT_TYPE),
    );
    Ok(response)
}

/// `DELETE /api/recordings/{id}`
#[instrument(skip(state))]
pub(crate) async fn delete_recording(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let store = state.store.clone();
    run_blocking(move || store.delete(&id)).await?;

    Ok(Json(MessageResponse {
        message: "Recording deleted successfully",
    }))
}

/// `POST /api/record`
///
/// Blocks (on the blocking pool) for the whole capture.
#[instrument(skip(state, body))]
pub(crate) async fn start_recording(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<Recording>, ApiError> {
    let request = RecordRequest::from_body(&body)?;
    info!(duration = ?request.duration, "Recording requested");

    let recorder = state.recorder.clone();
    let recording = run_blocking(move || recorder.record(request.duration)).await?;

    Ok(Json(recording))
}
