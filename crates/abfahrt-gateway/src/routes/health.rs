//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response body.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "degraded".
    pub status: String,
    /// Gateway version.
    pub version: String,
    /// Whether the store answered a ping.
    pub redis_connected: bool,
    /// Number of currently streaming sessions.
    pub active_sessions: usize,
}

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let redis_connected = state.store.ping().await.is_ok();

    Json(HealthResponse {
        status: if redis_connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        redis_connected,
        active_sessions: state.active_sessions(),
    })
}
