//! Error handling for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Could not create the per-connection read cursor.
    #[error("failed to create read cursor: {0}")]
    CursorCreate(#[from] abfahrt_store::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::CursorCreate(e) => {
                warn!(error = %e, "failed to create read cursor");
                // The dashboard only distinguishes "stream open" from "not";
                // a bare 500 body matches what it expects.
                (StatusCode::INTERNAL_SERVER_ERROR, "500").into_response()
            }
        }
    }
}
