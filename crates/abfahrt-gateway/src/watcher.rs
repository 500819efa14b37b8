//! Change watcher.
//!
//! Bridges store-level "key set" notifications to the event log: each
//! notification names a departure key written by the external ingester; the
//! watcher re-reads the key, filters its departures, and publishes the
//! resulting station update for every session to pick up.

use std::sync::Arc;

use abfahrt_core::{subway_departures, Departure, StationDirectory, StationUpdate};
use abfahrt_store::{Error as StoreError, Store};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Background task translating key-set notifications into log entries.
pub struct ChangeWatcher {
    store: Store,
    stations: Arc<StationDirectory>,
}

impl ChangeWatcher {
    /// Create a new watcher.
    pub fn new(store: Store, stations: Arc<StationDirectory>) -> Self {
        Self { store, stations }
    }

    /// Run until the process-wide shutdown signal fires.
    ///
    /// Any single notification's failure (fetch, decode, serialize, append)
    /// is logged and skipped; the loop itself only ends on shutdown or if
    /// the subscription connection dies.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), StoreError> {
        let mut events = self.store.subscribe_key_events().await?;
        info!(
            pattern = %self.store.config().key_event_pattern,
            "change watcher subscribed"
        );

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("change watcher shutting down");
                    return Ok(());
                }
                key = events.next_key() => {
                    self.handle_key_set(&key?).await;
                }
            }
        }
    }

    /// Process one "key set" notification.
    async fn handle_key_set(&self, key: &str) {
        debug!(key, "received key-set notification");

        let Some(station_id) = station_id_from_key(key) else {
            warn!(key, "key does not follow the station naming scheme, skipping");
            return;
        };

        // Re-read the key rather than trusting the notification: the value
        // may already have changed again, and the latest state is the one
        // worth broadcasting.
        let raw = match self.store.fetch(key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "failed to fetch departures");
                return;
            }
        };

        let update = match build_update(station_id, &raw, &self.stations) {
            Ok(update) => update,
            Err(e) => {
                warn!(key, error = %e, "failed to decode departures");
                return;
            }
        };

        let payload = match serde_json::to_string(&update) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize station update");
                return;
            }
        };

        match self.store.append(&payload).await {
            Ok(id) => debug!(station = station_id, entry = %id, "published station update"),
            Err(e) => warn!(station = station_id, error = %e, "failed to append station update"),
        }
    }
}

/// Extract the station id from a departure key.
///
/// Keys follow `<prefix>_<station id>`, e.g. `departures_de:09162:6`.
fn station_id_from_key(key: &str) -> Option<&str> {
    key.split('_').nth(1).filter(|id| !id.is_empty())
}

/// Decode a key's raw departure JSON and build the update to publish.
fn build_update(
    station_id: &str,
    raw: &str,
    stations: &StationDirectory,
) -> Result<StationUpdate, serde_json::Error> {
    let departures: Vec<Departure> = serde_json::from_str(raw)?;
    Ok(StationUpdate::new(
        station_id,
        subway_departures(departures),
        stations,
    ))
}
