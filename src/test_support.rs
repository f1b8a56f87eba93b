//! Scripted provider used by the unit tests.

use crate::provider::client::WeatherProvider;
use crate::provider::error::ProviderError;
use crate::provider::request::{Endpoint, ProviderRequest};
use crate::types::dataset::Dataset;
use crate::types::track::{Track, TrackPoint};
use chrono::NaiveDate;
use std::sync::Mutex;

type Matcher = Box<dyn Fn(&ProviderRequest) -> bool + Send + Sync>;
type Hook = Box<dyn Fn(usize) + Send + Sync>;

enum Reply {
    Body(String),
    Status(u16),
}

/// Serves canned replies keyed by request parameters and records every request.
/// Requests matching no route get an empty JSON array.
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    routes: Vec<(Matcher, Reply)>,
    calls: Mutex<Vec<ProviderRequest>>,
    after_fetch: Option<Hook>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(mut self, matcher: Matcher, reply: Reply) -> Self {
        self.routes.push((matcher, reply));
        self
    }

    /// Station search reply for `dataset`.
    pub fn search(self, dataset: Dataset, body: impl Into<String>) -> Self {
        self.route(
            Box::new(move |r| {
                r.endpoint == Endpoint::StationSearch && r.param("dataset") == Some(dataset.id())
            }),
            Reply::Body(body.into()),
        )
    }

    /// Data access reply for `station` and `dataset`, optionally only for one start date.
    pub fn data(
        self,
        station: &str,
        dataset: Dataset,
        start_date: Option<&str>,
        body: impl Into<String>,
    ) -> Self {
        let matcher = data_matcher(station, dataset, start_date);
        self.route(matcher, Reply::Body(body.into()))
    }

    /// Data access for `station` and `dataset` answers with HTTP 500.
    pub fn failing(self, station: &str, dataset: Dataset) -> Self {
        let matcher = data_matcher(station, dataset, None);
        self.route(matcher, Reply::Status(500))
    }

    /// Runs `hook` with the number of requests served so far, after each request.
    pub fn after_fetch(mut self, hook: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.after_fetch = Some(Box::new(hook));
        self
    }

    pub fn calls(&self) -> Vec<ProviderRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Stations that received at least one data access request, in first-request order.
    pub fn data_stations(&self, dataset: Dataset) -> Vec<String> {
        let mut stations: Vec<String> = Vec::new();
        for call in self.calls() {
            if call.endpoint != Endpoint::DataAccess || call.param("dataset") != Some(dataset.id()) {
                continue;
            }
            let station = call.param("stations").unwrap_or_default().to_string();
            if !stations.contains(&station) {
                stations.push(station);
            }
        }
        stations
    }
}

fn data_matcher(station: &str, dataset: Dataset, start_date: Option<&str>) -> Matcher {
    let station = station.to_string();
    let start_date = start_date.map(str::to_string);
    Box::new(move |r| {
        r.endpoint == Endpoint::DataAccess
            && r.param("stations") == Some(station.as_str())
            && r.param("dataset") == Some(dataset.id())
            && start_date
                .as_deref()
                .is_none_or(|date| r.param("startDate") == Some(date))
    })
}

impl WeatherProvider for ScriptedProvider {
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<u8>, ProviderError> {
        let served = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(request.clone());
            calls.len()
        };
        let reply = self
            .routes
            .iter()
            .find(|(matcher, _)| matcher(request))
            .map(|(_, reply)| reply);
        let result = match reply {
            Some(Reply::Body(body)) => Ok(body.clone().into_bytes()),
            Some(Reply::Status(code)) => Err(ProviderError::HttpStatus {
                url: request.to_string(),
                status: reqwest::StatusCode::from_u16(*code).unwrap(),
                reason: "scripted failure".to_string(),
                body: None,
            }),
            None => Ok(b"[]".to_vec()),
        };
        if let Some(hook) = &self.after_fetch {
            hook(served);
        }
        result
    }
}

/// Search response listing `(id, latitude, longitude)` entries in the given order.
pub(crate) fn search_body(stations: &[(&str, f64, f64)]) -> String {
    let results: Vec<serde_json::Value> = stations
        .iter()
        .map(|(id, lat, lon)| {
            serde_json::json!({
                "id": id,
                "name": format!("Station {id}"),
                "latitude": lat.to_string(),
                "longitude": lon.to_string(),
            })
        })
        .collect();
    serde_json::json!({ "results": results }).to_string()
}

/// A complete daily summary for `date`, split over several entries like the provider does.
pub(crate) fn summary_body(date: &str) -> String {
    serde_json::json!([
        { "DATE": date, "STATION": "S", "TMAX": "24.4", "TMIN": "" },
        { "DATE": date, "STATION": "S", "TMIN": "11.1", "PRCP": "0.3" },
    ])
    .to_string()
}

/// Daily summary for `date` without precipitation.
pub(crate) fn summary_without_precipitation(date: &str) -> String {
    serde_json::json!([{ "DATE": date, "TMAX": "24.4", "TMIN": "11.1", "PRCP": " " }]).to_string()
}

pub(crate) fn normals_daily_body() -> String {
    serde_json::json!([{
        "DATE": "07-14",
        "STATION": "S",
        "DLY-TMAX-NORMAL": "29.2",
        "DLY-TMIN-NORMAL": "13.8",
        "DLY-TAVG-NORMAL": "21.5",
    }])
    .to_string()
}

pub(crate) fn normals_monthly_body() -> String {
    serde_json::json!([{
        "DATE": "07",
        "MLY-TMAX-NORMAL": "28.9",
        "MLY-TMIN-NORMAL": "13.4",
        "MLY-TAVG-NORMAL": "21.1",
    }])
    .to_string()
}

/// Two-point track near Boulder, CO starting 2023-07-14 08:00.
pub(crate) fn boulder_track() -> Track {
    Track::new(
        vec![TrackPoint::new(40.0150, -105.2705), TrackPoint::new(40.0583, -105.2100)],
        NaiveDate::from_ymd_opt(2023, 7, 14)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    )
}
