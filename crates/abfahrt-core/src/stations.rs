//! Static station directory.
//!
//! Maps station ids to display names and map coordinates. The ingester only
//! ships ids, so the broadcaster resolves presentation data locally. The
//! built-in table covers the Munich U-Bahn hubs the dashboard shows; a
//! deployment can replace it with a JSON file via `--stations`.

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::model::Coordinates;

/// Display data for one station.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
    pub friendly_name: String,
    pub coordinates: Coordinates,
}

impl StationInfo {
    fn new(friendly_name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            friendly_name: friendly_name.to_string(),
            coordinates: Coordinates {
                latitude,
                longitude,
            },
        }
    }
}

/// Lookup table from station id to [`StationInfo`].
#[derive(Debug, Clone)]
pub struct StationDirectory {
    stations: HashMap<String, StationInfo>,
}

impl StationDirectory {
    /// Build a directory from explicit entries.
    pub fn new(stations: HashMap<String, StationInfo>) -> Self {
        Self { stations }
    }

    /// Load a directory from a JSON object of `id -> {friendlyName, coordinates}`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let stations = serde_json::from_reader(reader)?;
        Ok(Self { stations })
    }

    /// Look up a station id. `None` for ids outside the table.
    pub fn get(&self, station_id: &str) -> Option<&StationInfo> {
        self.stations.get(station_id)
    }

    /// Number of known stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True when the directory holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationDirectory {
    /// The compiled-in Munich table.
    fn default() -> Self {
        let mut stations = HashMap::new();
        stations.insert(
            "de:09162:6".to_string(),
            StationInfo::new("Hauptbahnhof", 48.140_2, 11.560_1),
        );
        stations.insert(
            "de:09162:2".to_string(),
            StationInfo::new("Marienplatz", 48.137_4, 11.575_5),
        );
        stations.insert(
            "de:09162:1".to_string(),
            StationInfo::new("Karlsplatz (Stachus)", 48.139_4, 11.565_6),
        );
        stations.insert(
            "de:09162:4".to_string(),
            StationInfo::new("Sendlinger Tor", 48.133_5, 11.567_2),
        );
        stations.insert(
            "de:09162:50".to_string(),
            StationInfo::new("Münchner Freiheit", 48.161_4, 11.586_6),
        );
        stations.insert(
            "de:09162:70".to_string(),
            StationInfo::new("Odeonsplatz", 48.142_8, 11.577_0),
        );
        Self { stations }
    }
}
