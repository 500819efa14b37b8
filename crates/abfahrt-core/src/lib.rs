//! Abfahrt Core - Domain model and departure filtering.
//!
//! This crate holds the pure parts of the broadcaster: the wire model for
//! departure updates, the subway filter, and the static station directory.
//! It performs no I/O.

pub mod filter;
pub mod model;
pub mod stations;

pub use filter::{subway_departures, MAX_DEPARTURES};
pub use model::{Coordinates, Departure, StationUpdate};
pub use stations::{StationDirectory, StationInfo};
