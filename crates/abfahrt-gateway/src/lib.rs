//! Abfahrt Gateway - SSE broadcaster for departure updates.
//!
//! Bridges an externally populated Redis store to any number of browser
//! clients: a watcher task turns "key set" notifications into station
//! updates on a bounded event log, and every `/events` connection follows
//! that log with its own cursor.

pub mod config;
pub mod error;
pub mod routes;
pub mod watcher;

pub use config::{Args, GatewayConfig};
pub use error::AppError;
pub use watcher::ChangeWatcher;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use abfahrt_store::Store;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Store client backing the event log.
    pub store: Store,
    /// Gateway configuration.
    pub config: GatewayConfig,
    /// Number of currently streaming sessions. Bookkeeping only; fan-out
    /// runs entirely through the store.
    active_sessions: Arc<AtomicUsize>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Store, config: GatewayConfig) -> Self {
        Self {
            store,
            config,
            active_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Current number of open streaming sessions.
    pub fn active_sessions(&self) -> usize {
        self.active_sessions.load(Ordering::Relaxed)
    }

    pub(crate) fn session_gauge(&self) -> Arc<AtomicUsize> {
        self.active_sessions.clone()
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::events::routes())
        .merge(routes::health::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
