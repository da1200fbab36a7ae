use crate::api::{
    ApiState,
    handlers::{delete_recording, get_recording, list_recordings, start_recording},
};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the HTTP surface over `state`.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/recordings", get(list_recordings))
        .route(
            "/api/recordings/{id}",
            get(get_recording).delete(delete_recording),
        )
        .route("/api/record", post(start_recording))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
