//! Per-connection read cursors over the event log.

use std::time::Duration;

use redis::aio::MultiplexedConnection;
use redis::streams::{StreamReadOptions, StreamReadReply};
use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::error::Error;
use crate::store::PAYLOAD_FIELD;

/// One delivered log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Store-assigned, monotonically increasing entry id.
    pub id: String,
    /// Serialized station update.
    pub payload: String,
}

/// A named position over the event log, isolated from all other cursors.
///
/// Entries are auto-acknowledged on delivery (NOACK): delivery is
/// best-effort, at-most-once. Dropping the cursor destroys its consumer
/// group on the server.
pub struct ReadCursor {
    conn: MultiplexedConnection,
    stream_key: String,
    group: String,
    batch: usize,
    block: Duration,
}

impl ReadCursor {
    pub(crate) fn new(
        conn: MultiplexedConnection,
        stream_key: String,
        group: String,
        batch: usize,
        block: Duration,
    ) -> Self {
        Self {
            conn,
            stream_key,
            group,
            batch,
            block,
        }
    }

    /// The cursor's group (and consumer) name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Block for up to the configured timeout and return the next batch of
    /// entries, in log order.
    ///
    /// An empty batch means the timeout elapsed with nothing new; callers
    /// treat that as a heartbeat and read again.
    pub async fn next_batch(&mut self) -> Result<Vec<LogEntry>, Error> {
        let options = StreamReadOptions::default()
            .group(&self.group, &self.group)
            .count(self.batch)
            .block(self.block.as_millis() as usize)
            .noack();

        let reply: Option<StreamReadReply> = self
            .conn
            .xread_options(&[self.stream_key.as_str()], &[">"], &options)
            .await?;

        let Some(reply) = reply else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for stream in reply.keys {
            for entry in stream.ids {
                match entry.get::<String>(PAYLOAD_FIELD) {
                    Some(payload) => entries.push(LogEntry {
                        id: entry.id.clone(),
                        payload,
                    }),
                    None => warn!(entry = %entry.id, "log entry has no payload field, skipping"),
                }
            }
        }
        Ok(entries)
    }
}

impl Drop for ReadCursor {
    fn drop(&mut self) {
        let mut conn = self.conn.clone();
        let stream_key = self.stream_key.clone();
        let group = self.group.clone();

        // Teardown is fire-and-forget; outside a runtime (tests) the group
        // is left for Redis to clean up manually.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let destroyed: Result<i64, redis::RedisError> =
                    conn.xgroup_destroy(&stream_key, &group).await;
                match destroyed {
                    Ok(_) => debug!(group = %group, "destroyed cursor group"),
                    Err(e) => warn!(group = %group, error = %e, "failed to destroy cursor group"),
                }
            });
        }
    }
}
