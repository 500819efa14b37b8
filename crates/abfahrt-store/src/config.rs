//! Store configuration.

use std::time::Duration;

/// Default Redis URL.
pub const DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// Default stream key holding the shared event log.
pub const DEFAULT_STREAM_KEY: &str = "mvg-events";

/// Default approximate retention of the event log, in entries.
pub const DEFAULT_MAX_LOG_LEN: usize = 200;

/// Default number of entries fetched per blocking cursor read.
pub const DEFAULT_READ_BATCH: usize = 10;

/// Default block timeout for cursor reads.
pub const DEFAULT_BLOCK_TIMEOUT: Duration = Duration::from_secs(1);

/// Default keyspace-event pattern matching "value was set" notifications.
pub const DEFAULT_KEY_EVENT_PATTERN: &str = "__keyevent*__:set";

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Redis connection URL.
    pub url: String,

    /// Stream key of the shared event log.
    pub stream_key: String,

    /// Approximate number of entries retained in the log (`MAXLEN ~`).
    pub max_log_len: usize,

    /// Maximum entries delivered per cursor read.
    pub read_batch: usize,

    /// How long a cursor read blocks waiting for new entries.
    pub block_timeout: Duration,

    /// PSUBSCRIBE pattern for "key set" notifications.
    pub key_event_pattern: String,
}

impl StoreConfig {
    /// Create a configuration for the given Redis URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            stream_key: DEFAULT_STREAM_KEY.to_string(),
            max_log_len: DEFAULT_MAX_LOG_LEN,
            read_batch: DEFAULT_READ_BATCH,
            block_timeout: DEFAULT_BLOCK_TIMEOUT,
            key_event_pattern: DEFAULT_KEY_EVENT_PATTERN.to_string(),
        }
    }

    /// Create a configuration for a local Redis on the default port.
    pub fn localhost() -> Self {
        Self::new(DEFAULT_URL)
    }

    /// Set the stream key of the shared event log.
    pub fn with_stream_key(mut self, key: impl Into<String>) -> Self {
        self.stream_key = key.into();
        self
    }

    /// Set the approximate log retention.
    pub fn with_max_log_len(mut self, len: usize) -> Self {
        self.max_log_len = len;
        self
    }

    /// Set the cursor read batch size.
    pub fn with_read_batch(mut self, batch: usize) -> Self {
        self.read_batch = batch;
        self
    }

    /// Set the cursor block timeout.
    pub fn with_block_timeout(mut self, timeout: Duration) -> Self {
        self.block_timeout = timeout;
        self
    }

    /// Set the keyspace-event pattern.
    pub fn with_key_event_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.key_event_pattern = pattern.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::localhost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.stream_key, DEFAULT_STREAM_KEY);
        assert_eq!(config.max_log_len, DEFAULT_MAX_LOG_LEN);
        assert_eq!(config.read_batch, DEFAULT_READ_BATCH);
        assert_eq!(config.block_timeout, DEFAULT_BLOCK_TIMEOUT);
        assert_eq!(config.key_event_pattern, DEFAULT_KEY_EVENT_PATTERN);
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("redis://10.0.0.5:6380")
            .with_stream_key("test-events")
            .with_max_log_len(50)
            .with_read_batch(5)
            .with_block_timeout(Duration::from_millis(250))
            .with_key_event_pattern("__keyevent@0__:set");

        assert_eq!(config.url, "redis://10.0.0.5:6380");
        assert_eq!(config.stream_key, "test-events");
        assert_eq!(config.max_log_len, 50);
        assert_eq!(config.read_batch, 5);
        assert_eq!(config.block_timeout, Duration::from_millis(250));
        assert_eq!(config.key_event_pattern, "__keyevent@0__:set");
    }
}
