//! Defines the weather station as seen by a retrieval: provider identity plus its
//! distances to the track.

use crate::geo::LatLon;
use serde::{Deserialize, Serialize};

/// A candidate or selected NOAA weather station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherStation {
    /// The provider station identifier (e.g., "USW00094075"). Never empty.
    pub id: String,
    /// Display name, empty when the provider sent none.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Distance to the first track point in km, truncated to one decimal.
    pub distance_from_start: f64,
    /// Distance to the search area center in km, truncated to one decimal.
    pub distance_from_search_area_center: f64,
}

impl WeatherStation {
    pub fn location(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}
