//! Keyspace-event subscription.

use futures::StreamExt;
use redis::aio::PubSub;

use crate::error::Error;

/// A pub/sub subscription yielding the names of keys whose value was set.
///
/// Requires the server to have keyspace notifications enabled
/// (`notify-keyspace-events` including `K$` or `E$`).
pub struct KeyEvents {
    pubsub: PubSub,
}

impl KeyEvents {
    pub(crate) fn new(pubsub: PubSub) -> Self {
        Self { pubsub }
    }

    /// Wait for the next "key set" notification and return the changed key.
    ///
    /// Returns [`Error::SubscriptionClosed`] if the pub/sub connection ends.
    pub async fn next_key(&mut self) -> Result<String, Error> {
        let mut messages = self.pubsub.on_message();
        match messages.next().await {
            Some(msg) => Ok(msg.get_payload()?),
            None => Err(Error::SubscriptionClosed),
        }
    }
}
