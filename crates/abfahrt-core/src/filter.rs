//! Departure filtering.

use crate::model::Departure;

/// Maximum number of departures forwarded per station update.
pub const MAX_DEPARTURES: usize = 8;

/// Returns true when the label denotes a subway (U-Bahn) line.
fn is_subway(label: &str) -> bool {
    label.starts_with('U')
}

/// Keep only subway departures, in their original order, capped at
/// [`MAX_DEPARTURES`].
///
/// Pure and idempotent: filtering an already-filtered sequence is a no-op.
pub fn subway_departures(departures: Vec<Departure>) -> Vec<Departure> {
    let mut filtered: Vec<Departure> = departures
        .into_iter()
        .filter(|d| is_subway(&d.label))
        .collect();
    filtered.truncate(MAX_DEPARTURES);
    filtered
}
