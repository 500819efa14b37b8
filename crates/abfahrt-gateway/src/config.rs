//! Gateway configuration.

use std::path::PathBuf;
use std::time::Duration;

use abfahrt_store::StoreConfig;
use clap::Parser;

/// Abfahrt gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "abfahrt-gateway")]
#[command(about = "SSE broadcaster for MVG departure updates")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    pub listen: String,

    /// Redis connection URL.
    #[arg(short, long, default_value = "redis://127.0.0.1:6379")]
    pub redis: String,

    /// Stream key of the shared event log.
    #[arg(long, default_value = "mvg-events")]
    pub stream_key: String,

    /// Approximate number of log entries to retain.
    #[arg(long, default_value_t = 200)]
    pub max_log_len: usize,

    /// Entries delivered per blocking cursor read.
    #[arg(long, default_value_t = 10)]
    pub read_batch: usize,

    /// Timeout (ms) for a blocking cursor read.
    #[arg(long, default_value_t = 1_000)]
    pub block_timeout_ms: u64,

    /// Backoff (ms) before retrying a failed cursor read.
    #[arg(long, default_value_t = 500)]
    pub read_retry_backoff_ms: u64,

    /// Keyspace-event pattern matching "value was set" notifications.
    #[arg(long, default_value = "__keyevent*__:set")]
    pub key_event_pattern: String,

    /// Stations JSON file replacing the built-in directory.
    #[arg(long)]
    pub stations: Option<PathBuf>,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Backoff before retrying a failed cursor read, bounding the error
    /// loop of a streaming session.
    pub read_retry_backoff: Duration,
    /// Optional stations file overriding the built-in directory.
    pub stations_path: Option<PathBuf>,
    /// Store client configuration.
    pub store: StoreConfig,
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        let store = StoreConfig::new(&args.redis)
            .with_stream_key(&args.stream_key)
            .with_max_log_len(args.max_log_len)
            .with_read_batch(args.read_batch)
            .with_block_timeout(Duration::from_millis(args.block_timeout_ms))
            .with_key_event_pattern(&args.key_event_pattern);

        Self {
            listen_addr: args.listen.clone(),
            read_retry_backoff: Duration::from_millis(args.read_retry_backoff_ms),
            stations_path: args.stations.clone(),
            store,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_retry_backoff: Duration::from_millis(500),
            stations_path: None,
            store: StoreConfig::default(),
        }
    }
}
