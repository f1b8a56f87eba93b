use crate::geo::{distance_km, LatLon};
use crate::provider::client::WeatherProvider;
use crate::provider::error::ProviderError;
use crate::provider::request::ProviderRequest;
use crate::search_area::SearchArea;
use crate::stations::search_result::{SearchResponse, SearchResult};
use crate::types::dataset::Dataset;
use crate::types::station::WeatherStation;
use crate::utils::truncate_to_tenth;
use log::{debug, info};
use ordered_float::OrderedFloat;

/// Finds the provider's candidate stations inside a search area.
pub struct StationFinder<'a, P> {
    provider: &'a P,
}

impl<'a, P: WeatherProvider> StationFinder<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Stations holding `dataset` inside `area`, closest to the track start first.
    ///
    /// `window` restricts the search to stations with data between two `YYYY-MM-DD`
    /// dates. An empty reply or one without a `results` container yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates transport and HTTP failures, and [`ProviderError::JsonParse`] when the
    /// reply is not JSON at all.
    pub async fn find(
        &self,
        area: &SearchArea,
        dataset: Dataset,
        window: Option<(String, String)>,
    ) -> Result<Vec<WeatherStation>, ProviderError> {
        let request = ProviderRequest::station_search(area, dataset, window);
        debug!("Searching {} stations: {}", dataset, request);
        let body = self.provider.fetch(&request).await?;
        let stations = rank_stations(&body, area)?;
        info!(
            "Found {} candidate station(s) for {} within {:.0} m of {:?}",
            stations.len(),
            dataset,
            area.radius_m,
            area.center
        );
        Ok(stations)
    }
}

/// Parses a station search reply and orders its valid entries by distance from the start.
///
/// Entries without an id or usable coordinates are skipped. Distances are truncated to
/// one decimal before sorting, and the sort is stable, so stations at the same truncated
/// distance keep the provider's order.
pub fn rank_stations(body: &[u8], area: &SearchArea) -> Result<Vec<WeatherStation>, ProviderError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let response: serde_json::Value = serde_json::from_slice(body)?;
    let Ok(SearchResponse {
        results: Some(results),
    }) = serde_json::from_value::<SearchResponse>(response)
    else {
        return Ok(Vec::new());
    };

    let mut stations: Vec<WeatherStation> = results
        .into_iter()
        .filter_map(|entry| {
            let result = serde_json::from_value::<SearchResult>(entry)
                .inspect_err(|e| debug!("Skipping malformed station entry: {}", e))
                .ok()?;
            to_station(&result, area)
        })
        .collect();

    stations.sort_by_key(|s| OrderedFloat(s.distance_from_start));
    Ok(stations)
}

fn to_station(result: &SearchResult, area: &SearchArea) -> Option<WeatherStation> {
    let (Some(id), Some((latitude, longitude))) = (result.station_id(), result.coordinates()) else {
        debug!("Skipping invalid station {:?}", result.station_id());
        return None;
    };
    let location = LatLon(latitude, longitude);
    Some(WeatherStation {
        id: id.to_string(),
        name: result.display_name().trim().to_string(),
        latitude,
        longitude,
        distance_from_start: truncate_to_tenth(distance_km(location, area.start)),
        distance_from_search_area_center: truncate_to_tenth(distance_km(location, area.center)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::travel;
    use crate::test_support::{search_body, ScriptedProvider};

    fn area() -> SearchArea {
        let start = LatLon(40.0, -105.0);
        SearchArea::around(start, travel(start, 90.0, 30_000.0), 30_000.0)
    }

    fn point_at(km: f64, bearing: f64) -> LatLon {
        travel(LatLon(40.0, -105.0), bearing, km * 1000.0)
    }

    #[test]
    fn test_stations_sorted_by_distance_from_start() {
        let far = point_at(45.0, 10.0);
        let near = point_at(5.05, 200.0);
        let mid = point_at(12.3, 300.0);
        let body = search_body(&[("FAR", far.0, far.1), ("NEAR", near.0, near.1), ("MID", mid.0, mid.1)]);

        let stations = rank_stations(body.as_bytes(), &area()).unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["NEAR", "MID", "FAR"]);
        assert!(stations
            .windows(2)
            .all(|w| w[0].distance_from_start <= w[1].distance_from_start));
        // Truncated, not rounded.
        assert_eq!(stations[0].distance_from_start, 5.0);
        assert_eq!(stations[0].name, "Station NEAR");
    }

    #[test]
    fn test_equal_truncated_distances_keep_provider_order() {
        let a = point_at(12.34, 0.0);
        let b = point_at(12.31, 180.0);
        let body = search_body(&[("A", a.0, a.1), ("B", b.0, b.1)]);

        let stations = rank_stations(body.as_bytes(), &area()).unwrap();
        assert_eq!(stations[0].distance_from_start, stations[1].distance_from_start);
        assert_eq!(stations[0].id, "A");
        assert_eq!(stations[1].id, "B");
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let body = serde_json::json!({
            "results": [
                { "id": "", "latitude": 40.1, "longitude": -105.1 },
                { "id": "NOLAT", "longitude": -105.1 },
                { "id": "BADLAT", "latitude": "north", "longitude": -105.1 },
                { "id": "OUTOFRANGE", "latitude": 123.0, "longitude": -105.1 },
                { "id": 42, "latitude": 40.1, "longitude": -105.1 },
                { "id": "OK", "latitude": "40.1", "longitude": "-105.1" },
            ]
        })
        .to_string();

        let stations = rank_stations(body.as_bytes(), &area()).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "OK");
        assert!(stations[0].location().is_valid());
    }

    #[test]
    fn test_nested_provider_shape() {
        let body = serde_json::json!({
            "results": [{
                "id": "USW00094075.csv",
                "name": "BOULDER 14 W, CO US",
                "stations": [{ "id": "USW00094075", "name": "BOULDER 14 W, CO US" }],
                "location": { "coordinates": [-105.5394, 40.0354] }
            }]
        })
        .to_string();

        let stations = rank_stations(body.as_bytes(), &area()).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "USW00094075");
        assert_eq!(stations[0].latitude, 40.0354);
        assert_eq!(stations[0].longitude, -105.5394);
        assert!(stations[0].distance_from_search_area_center > stations[0].distance_from_start);
    }

    #[test]
    fn test_entry_with_id_and_station_id_is_kept() {
        let body = serde_json::json!({
            "results": [{
                "id": "GHCND:USW00094075",
                "stationId": "USW00094075",
                "name": "BOULDER 14 W, CO US",
                "latitude": 40.0354,
                "longitude": -105.5394,
            }]
        })
        .to_string();

        let stations = rank_stations(body.as_bytes(), &area()).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "USW00094075");
    }

    #[test]
    fn test_missing_results_is_not_an_error() {
        assert!(rank_stations(b"", &area()).unwrap().is_empty());
        assert!(rank_stations(b"{}", &area()).unwrap().is_empty());
        assert!(rank_stations(br#"{"results": null}"#, &area()).unwrap().is_empty());
        assert!(rank_stations(b"[]", &area()).unwrap().is_empty());
        assert!(matches!(
            rank_stations(b"<html>", &area()),
            Err(ProviderError::JsonParse(_))
        ));
    }

    #[tokio::test]
    async fn test_find_sends_dataset_and_window() {
        let provider = ScriptedProvider::new().search(
            Dataset::DailySummaries,
            search_body(&[("S1", 40.01, -105.01)]),
        );
        let stations = StationFinder::new(&provider)
            .find(
                &area(),
                Dataset::DailySummaries,
                Some(("2020-01-01".into(), "2023-12-31".into())),
            )
            .await
            .unwrap();

        assert_eq!(stations.len(), 1);
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].param("dataset"), Some("daily-summaries"));
        assert_eq!(calls[0].param("startDate"), Some("2020-01-01"));
        assert_eq!(calls[0].param("boundingBox"), Some(area().extent().as_str()));
    }
}
