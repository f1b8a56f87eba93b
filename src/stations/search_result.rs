//! Wire shapes of the station search endpoint.
//!
//! Result entries come either flat (`id`, `name`, `latitude`, `longitude`) or in the
//! provider's nested form (`stations: [{id, name}]`, `location.coordinates: [lon, lat]`).
//! Coordinates may be numbers or numeric strings.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    /// Entries are decoded one by one so a malformed entry only drops itself.
    pub results: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResult {
    pub station_id: Option<String>,
    /// Names the result. In the flat shape it doubles as the station id.
    pub id: Option<String>,
    pub name: Option<String>,
    pub latitude: Option<NumberOrText>,
    pub longitude: Option<NumberOrText>,
    #[serde(default)]
    pub stations: Vec<StationRef>,
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StationRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeoPoint {
    /// GeoJSON order: longitude first.
    #[serde(default)]
    pub coordinates: Vec<NumberOrText>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl SearchResult {
    /// Station id: the nested station list first, then `stationId`, then `id`. In the
    /// nested form the top-level `id` names the result, not the station.
    pub fn station_id(&self) -> Option<&str> {
        [
            self.stations.first().and_then(|s| s.id.as_deref()),
            self.station_id.as_deref(),
            self.id.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|id| !id.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.stations
            .first()
            .and_then(|s| s.name.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("")
    }

    /// `(latitude, longitude)`, finite and within degree ranges.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let flat = self
            .latitude
            .as_ref()
            .and_then(NumberOrText::as_f64)
            .zip(self.longitude.as_ref().and_then(NumberOrText::as_f64));
        let nested = || {
            let coords = &self.location.as_ref()?.coordinates;
            let lon = coords.first()?.as_f64()?;
            let lat = coords.get(1)?.as_f64()?;
            Some((lat, lon))
        };
        flat.or_else(nested).filter(|(lat, lon)| {
            lat.is_finite()
                && lon.is_finite()
                && (-90.0..=90.0).contains(lat)
                && (-180.0..=180.0).contains(lon)
        })
    }
}
