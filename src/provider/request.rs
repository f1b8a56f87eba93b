//! Requests understood by the NOAA access services.

use crate::provider::error::ProviderError;
use crate::search_area::SearchArea;
use crate::types::dataset::Dataset;
use reqwest::Url;
use std::fmt;

/// The two NOAA endpoints used by a retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Finds stations holding a dataset inside a bounding box.
    StationSearch,
    /// Returns the records of one station for a dataset and date range.
    DataAccess,
}

impl Endpoint {
    pub(crate) fn path(&self) -> &'static str {
        match self {
            Endpoint::StationSearch => "search/v1/data",
            Endpoint::DataAccess => "data/v1",
        }
    }
}

/// A GET request against the provider: an endpoint plus ordered query parameters.
///
/// The units and result-limit parameters are not part of the request; the client adds
/// them to every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
}

impl ProviderRequest {
    /// Station search for `dataset` inside the bounding box of `area`, optionally limited to
    /// stations holding data between `window.0` and `window.1` (`YYYY-MM-DD`).
    pub fn station_search(
        area: &SearchArea,
        dataset: Dataset,
        window: Option<(String, String)>,
    ) -> Self {
        let mut params = vec![
            ("boundingBox", area.extent()),
            ("dataset", dataset.id().to_string()),
        ];
        if let Some((start, end)) = window {
            params.push(("startDate", start));
            params.push(("endDate", end));
        }
        Self {
            endpoint: Endpoint::StationSearch,
            params,
        }
    }

    /// Records of `station_id` for `dataset` between two `YYYY-MM-DD` dates (inclusive).
    pub fn data_access(station_id: &str, dataset: Dataset, start: &str, end: &str) -> Self {
        Self {
            endpoint: Endpoint::DataAccess,
            params: vec![
                ("format", "json".to_string()),
                ("stations", station_id.to_string()),
                ("dataset", dataset.id().to_string()),
                ("dataTypes", dataset.data_types().join(",")),
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ],
        }
    }

    /// First value of the query parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Full URL below `base`, with the fixed `units=metric` and `limit` parameters appended.
    pub fn to_url(&self, base: &str, limit: u32) -> Result<Url, ProviderError> {
        let invalid = |reason: String| ProviderError::InvalidBaseUrl {
            url: base.to_string(),
            reason,
        };
        let base = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        let mut url = base
            .join(self.endpoint.path())
            .map_err(|e| invalid(e.to_string()))?;
        url.query_pairs_mut()
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("units", "metric")
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

impl fmt::Display for ProviderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?", self.endpoint.path())?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, "&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
