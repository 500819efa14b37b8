//! Wire model for departure updates.
//!
//! Field names follow the JSON contract consumed by the dashboard frontend,
//! so everything serializes in camelCase.

use serde::{Deserialize, Serialize};

use crate::stations::StationDirectory;

/// A single upcoming departure at a station.
///
/// Decoded from the raw departure JSON the ingester writes into the store,
/// and re-serialized unchanged inside a [`StationUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    /// Scheduled departure time, epoch seconds.
    pub planned_departure_time: i64,
    /// Realtime departure estimate, epoch seconds.
    pub realtime_departure_time: i64,
    /// Transit line identifier, e.g. `U3` or `S2`.
    pub label: String,
    /// Delay relative to schedule. Negative means early.
    pub delay_in_minutes: i32,
    /// Terminus the vehicle is headed to.
    pub destination: String,
}

/// Geographic position of a station.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One published update: a station plus its filtered departures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationUpdate {
    /// Station id as embedded in the changed key, e.g. `de:09162:6`.
    pub station: String,
    /// Human-readable station name, empty when the id is unknown.
    pub friendly_name: String,
    /// Station position, zeroed when the id is unknown.
    pub coordinates: Coordinates,
    /// Filtered departures, subway-only and capped.
    pub departures: Vec<Departure>,
}

impl StationUpdate {
    /// Assemble an update for a station from already-filtered departures,
    /// resolving name and position through the directory.
    pub fn new(station: &str, departures: Vec<Departure>, directory: &StationDirectory) -> Self {
        let (friendly_name, coordinates) = directory
            .get(station)
            .map(|info| (info.friendly_name.clone(), info.coordinates))
            .unwrap_or_default();

        Self {
            station: station.to_string(),
            friendly_name,
            coordinates,
            departures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::StationDirectory;

    fn departure(label: &str) -> Departure {
        Departure {
            planned_departure_time: 1_700_000_000,
            realtime_departure_time: 1_700_000_120,
            label: label.to_string(),
            delay_in_minutes: 2,
            destination: "Messestadt Ost".to_string(),
        }
    }

    #[test]
    fn departure_uses_wire_field_names() {
        let json = serde_json::to_value(departure("U2")).unwrap();
        assert_eq!(json["plannedDepartureTime"], 1_700_000_000_i64);
        assert_eq!(json["realtimeDepartureTime"], 1_700_000_120_i64);
        assert_eq!(json["label"], "U2");
        assert_eq!(json["delayInMinutes"], 2);
        assert_eq!(json["destination"], "Messestadt Ost");
    }

    #[test]
    fn departure_roundtrips_from_ingester_json() {
        let raw = r#"{
            "plannedDepartureTime": 1700000000,
            "realtimeDepartureTime": 1699999940,
            "label": "U6",
            "delayInMinutes": -1,
            "destination": "Klinikum Großhadern"
        }"#;
        let parsed: Departure = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.label, "U6");
        assert_eq!(parsed.delay_in_minutes, -1);
    }

    #[test]
    fn update_resolves_known_station() {
        let directory = StationDirectory::default();
        let update = StationUpdate::new("de:09162:6", vec![departure("U4")], &directory);
        assert_eq!(update.station, "de:09162:6");
        assert_eq!(update.friendly_name, "Hauptbahnhof");
        assert!(update.coordinates.latitude > 0.0);
        assert_eq!(update.departures.len(), 1);
    }

    #[test]
    fn update_for_unknown_station_has_empty_lookup_fields() {
        let directory = StationDirectory::default();
        let update = StationUpdate::new("de:00000:0", vec![], &directory);
        assert_eq!(update.friendly_name, "");
        assert_eq!(update.coordinates, Coordinates::default());
    }

    #[test]
    fn update_nests_coordinates_and_departures() {
        let directory = StationDirectory::default();
        let update = StationUpdate::new("de:09162:2", vec![departure("U3")], &directory);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["friendlyName"], "Marienplatz");
        assert!(json["coordinates"]["latitude"].is_f64());
        assert!(json["coordinates"]["longitude"].is_f64());
        assert_eq!(json["departures"][0]["label"], "U3");
    }
}
