//! Store error types.

use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Could not establish a connection to Redis.
    #[error("failed to connect to store: {0}")]
    Connect(#[source] redis::RedisError),

    /// A store command failed.
    #[error("store command failed: {0}")]
    Command(#[from] redis::RedisError),

    /// The key-event subscription terminated.
    #[error("key-event subscription closed")]
    SubscriptionClosed,
}
