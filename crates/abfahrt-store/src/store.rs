//! Store client.
//!
//! [`Store`] is the broadcaster's handle to Redis. It multiplexes point
//! reads and log appends over one shared connection; cursors and pub/sub
//! subscriptions get dedicated connections because their reads block.

use redis::aio::MultiplexedConnection;
use redis::streams::StreamMaxlen;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::cursor::ReadCursor;
use crate::error::Error;
use crate::events::KeyEvents;

/// Stream field under which the serialized update payload is stored.
pub(crate) const PAYLOAD_FIELD: &str = "json";

/// Async client for the shared event log and its backing key-value store.
#[derive(Clone)]
pub struct Store {
    client: redis::Client,
    conn: MultiplexedConnection,
    config: StoreConfig,
}

impl Store {
    /// Connect to the store and verify the connection with a PING.
    pub async fn connect(config: StoreConfig) -> Result<Self, Error> {
        let client = redis::Client::open(config.url.as_str()).map_err(Error::Connect)?;
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(Error::Connect)?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Error::Connect)?;

        Ok(Self {
            client,
            conn,
            config,
        })
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Check connectivity.
    pub async fn ping(&self) -> Result<(), Error> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Point read of a key's current string value.
    ///
    /// The value may have changed again since the notification that prompted
    /// the read; callers always want the latest state, so that is fine.
    pub async fn fetch(&self, key: &str) -> Result<String, Error> {
        let mut conn = self.conn.clone();
        let value: String = conn.get(key).await?;
        Ok(value)
    }

    /// Append one payload to the event log, trimming it to roughly the
    /// configured retention. Returns the store-assigned entry id.
    pub async fn append(&self, payload: &str) -> Result<String, Error> {
        let mut conn = self.conn.clone();
        let id: String = conn
            .xadd_maxlen(
                &self.config.stream_key,
                StreamMaxlen::Approx(self.config.max_log_len),
                "*",
                &[(PAYLOAD_FIELD, payload)],
            )
            .await?;
        Ok(id)
    }

    /// Current number of retained log entries.
    pub async fn log_len(&self) -> Result<usize, Error> {
        let mut conn = self.conn.clone();
        let len: usize = conn.xlen(&self.config.stream_key).await?;
        Ok(len)
    }

    /// Create a fresh cursor over the event log.
    ///
    /// Each cursor is its own consumer group, named by a random uuid, and
    /// starts at the oldest entry the log still retains. The group is
    /// created with MKSTREAM so clients can connect before the first append.
    /// Cursors read with BLOCK, so each one gets a dedicated connection.
    pub async fn create_cursor(&self) -> Result<ReadCursor, Error> {
        let group = Uuid::new_v4().to_string();
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(Error::Connect)?;

        let _: () = conn
            .xgroup_create_mkstream(&self.config.stream_key, &group, "0")
            .await?;

        Ok(ReadCursor::new(
            conn,
            self.config.stream_key.clone(),
            group,
            self.config.read_batch,
            self.config.block_timeout,
        ))
    }

    /// Subscribe to "key set" notifications on a dedicated pub/sub connection.
    pub async fn subscribe_key_events(&self) -> Result<KeyEvents, Error> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(Error::Connect)?;
        pubsub.psubscribe(&self.config.key_event_pattern).await?;
        Ok(KeyEvents::new(pubsub))
    }
}
