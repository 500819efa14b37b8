//! Abfahrt Store - Redis-backed event log and change notifications.
//!
//! This crate wraps the handful of Redis primitives the broadcaster relies
//! on: keyspace-event subscriptions, point reads of departure keys, a
//! bounded stream acting as the shared event log, and per-connection
//! consumer-group cursors over that log.
//!
//! # Quick Start
//!
//! ```ignore
//! use abfahrt_store::{Store, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), abfahrt_store::Error> {
//!     let store = Store::connect(StoreConfig::default()).await?;
//!     store.append("{\"station\":\"de:09162:6\"}").await?;
//!
//!     let mut cursor = store.create_cursor().await?;
//!     let batch = cursor.next_batch().await?;
//!     for entry in batch {
//!         println!("{} -> {}", entry.id, entry.payload);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod events;
pub mod store;

pub use config::StoreConfig;
pub use cursor::{LogEntry, ReadCursor};
pub use error::Error;
pub use events::KeyEvents;
pub use store::Store;
