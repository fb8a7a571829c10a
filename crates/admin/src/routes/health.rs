//! Health check endpoints.

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::{db::KeyValueStore, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Lists the storage keys before returning OK.
/// Returns 503 Service Unavailable if storage is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().keys().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "storage not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
