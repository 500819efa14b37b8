//! The `/events` stream endpoint.
//!
//! One connection, one session: every client gets its own cursor over the
//! shared event log and receives each retained entry as one SSE data frame.
//! Sessions never talk to each other; all fan-out happens in the store.

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use abfahrt_store::ReadCursor;
use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures::{stream, Stream, StreamExt};
use tracing::{info, warn};

use crate::error::AppError;
use crate::AppState;

/// Event stream routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events", get(stream_events))
}

/// Open a streaming session.
///
/// Cursor creation is the only fallible step; afterwards the session runs
/// until the client goes away. Dropping the response body (disconnect)
/// drops the cursor, which tears down its consumer group.
async fn stream_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let cursor = state.store.create_cursor().await?;
    let session = SessionGuard::open(cursor.group(), state.session_gauge());

    let stream = entry_stream(cursor, session, state.config.read_retry_backoff);

    let mut response = Sse::new(stream).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    Ok(response)
}

/// Turn a cursor into an endless stream of SSE events.
///
/// Empty batches are block timeouts and loop silently. Read errors are
/// logged and retried after a backoff so a broken store connection cannot
/// spin the session hot.
fn entry_stream(
    cursor: ReadCursor,
    session: SessionGuard,
    retry_backoff: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold((cursor, session), move |(mut cursor, session)| async move {
        loop {
            match cursor.next_batch().await {
                Ok(batch) if batch.is_empty() => continue,
                Ok(batch) => return Some((stream::iter(batch), (cursor, session))),
                Err(e) => {
                    warn!(session = %cursor.group(), error = %e, "event log read failed");
                    tokio::time::sleep(retry_backoff).await;
                }
            }
        }
    })
    .flatten()
    .map(|entry| Ok(Event::default().data(entry.payload)))
}

/// Lifecycle bookkeeping for one streaming session.
///
/// Holds the gateway-wide session gauge; construction and drop are the
/// add-on-open / remove-on-close hooks.
struct SessionGuard {
    id: String,
    gauge: Arc<AtomicUsize>,
}

impl SessionGuard {
    fn open(id: &str, gauge: Arc<AtomicUsize>) -> Self {
        let open = gauge.fetch_add(1, Ordering::Relaxed) + 1;
        info!(session = id, open, "client connected");
        Self {
            id: id.to_string(),
            gauge,
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let open = self.gauge.fetch_sub(1, Ordering::Relaxed) - 1;
        info!(session = %self.id, open, "client disconnected");
    }
}
