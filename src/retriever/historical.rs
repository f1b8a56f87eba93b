//! Retrieves the weather history of the place and time a track starts at.

use crate::provider::client::WeatherProvider;
use crate::provider::error::ProviderError;
use crate::provider::request::ProviderRequest;
use crate::retriever::error::RetrieveError;
use crate::retriever::fallback::first_valid;
use crate::retriever::progress::{ProgressCallback, RetrievalStage};
use crate::search_area::SearchArea;
use crate::stations::station_finder::StationFinder;
use crate::types::dataset::Dataset;
use crate::types::station::WeatherStation;
use crate::types::track::Track;
use crate::types::weather_record::WeatherRecord;
use crate::weather_data::record_parser::parse_record;
use bon::bon;
use chrono::{Datelike, Duration, NaiveDate};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Number of past years of daily summaries collected.
pub const PAST_YEARS: i64 = 3;
/// Days between two anniversary dates of the start date.
const DAYS_PER_PAST_YEAR: i64 = 364;
/// Year the climate normals are requested for.
const NORMALS_REFERENCE_YEAR: i32 = 2010;

/// Everything a retrieval found. Any part may be missing when no candidate station
/// had valid data for its dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalWeather {
    pub summaries_station: Option<WeatherStation>,
    /// One record per past year, most recent first. Empty without a summaries station.
    pub past_daily_summaries: Vec<WeatherRecord>,
    pub normals_station: Option<WeatherStation>,
    pub normals_daily: Option<WeatherRecord>,
    /// Monthly normals of the normals station, if it has them.
    pub normals_monthly: Option<WeatherRecord>,
}

impl HistoricalWeather {
    /// True when no dataset produced anything.
    pub fn is_empty(&self) -> bool {
        self.summaries_station.is_none() && self.normals_station.is_none()
    }
}

/// Orchestrates one retrieval per call: search area, station search and fallback over
/// candidate stations for daily summaries, then daily and monthly normals.
///
/// The retriever keeps no state between calls and can serve several retrievals
/// concurrently.
#[derive(Debug, Clone)]
pub struct HistoricalRetriever<P> {
    provider: P,
}

#[bon]
impl<P: WeatherProvider> HistoricalRetriever<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Retrieves the historical weather around the start of `track`.
    ///
    /// Stations are tried one at a time, closest to the start first. Provider failures
    /// only disqualify the station they happened for; a dataset without any valid
    /// station is left empty in the result.
    ///
    /// # Arguments
    ///
    /// * `.track(&Track)`: **Required.** The track, with at least one point.
    /// * `.cancel(CancellationToken)`: Optional. Checked before every station search and
    ///   station attempt.
    /// * `.on_progress(&dyn Fn(RetrievalStage))`: Optional. Told about each milestone.
    ///
    /// # Errors
    ///
    /// * [`RetrieveError::EmptyTrack`] before any request when the track has no points.
    /// * [`RetrieveError::Cancelled`] when `cancel` fires before the data is assembled.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use track_climate::{HistoricalRetriever, NoaaClient, Track, TrackPoint, TrackClimateError};
    /// # use chrono::NaiveDate;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), TrackClimateError> {
    /// let retriever = HistoricalRetriever::new(NoaaClient::from_env()?);
    /// let start = NaiveDate::from_ymd_opt(2023, 7, 14).unwrap().and_hms_opt(8, 0, 0).unwrap();
    /// let track = Track::new(vec![TrackPoint::new(40.015, -105.2705)], start);
    ///
    /// let weather = retriever.retrieve().track(&track).call().await?;
    /// if let Some(station) = &weather.summaries_station {
    ///     println!("Summaries from {} ({} km)", station.name, station.distance_from_start);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn retrieve(
        &self,
        track: &Track,
        cancel: Option<CancellationToken>,
        on_progress: Option<ProgressCallback<'_>>,
    ) -> Result<HistoricalWeather, RetrieveError> {
        let started = Instant::now();
        let report = |stage: RetrievalStage| {
            debug!("Retrieval progress: {}", stage);
            if let Some(callback) = on_progress {
                callback(stage);
            }
        };
        let cancel = cancel.unwrap_or_default();

        let area = SearchArea::from_track(track)?;
        report(RetrievalStage::AreaComputed);

        let start_date = track.start_date();
        let mut weather = HistoricalWeather::default();

        if let Some((station, records)) = self.daily_summaries(&area, start_date, &cancel).await? {
            weather.summaries_station = Some(station);
            weather.past_daily_summaries = records;
        }
        if let Some((station, record)) = self.normals_daily(&area, start_date, &cancel).await? {
            if cancel.is_cancelled() {
                return Err(RetrieveError::Cancelled);
            }
            weather.normals_monthly = self.normals_monthly(&station, start_date).await;
            weather.normals_station = Some(station);
            weather.normals_daily = Some(record);
        }
        // A token fired during the last request must not read as missing data.
        if cancel.is_cancelled() {
            return Err(RetrieveError::Cancelled);
        }
        report(RetrievalStage::DataRetrieved);

        info!(
            "Historical weather retrieved in {:.2?} (summaries: {}, normals: {})",
            started.elapsed(),
            weather
                .summaries_station
                .as_ref()
                .map_or("none", |s| s.id.as_str()),
            weather
                .normals_station
                .as_ref()
                .map_or("none", |s| s.id.as_str()),
        );
        report(RetrievalStage::Done);
        Ok(weather)
    }
}

impl<P: WeatherProvider> HistoricalRetriever<P> {
    /// Candidate stations for `dataset`. A failed search means no candidates.
    ///
    /// `cancel` is checked before the search is sent.
    async fn candidates(
        &self,
        area: &SearchArea,
        dataset: Dataset,
        window: Option<(String, String)>,
        cancel: &CancellationToken,
    ) -> Result<Vec<WeatherStation>, RetrieveError> {
        if cancel.is_cancelled() {
            info!("Retrieval cancelled before the {} station search", dataset);
            return Err(RetrieveError::Cancelled);
        }
        Ok(StationFinder::new(&self.provider)
            .find(area, dataset, window)
            .await
            .unwrap_or_else(|e| {
                warn!("{} station search failed: {}", dataset, e);
                Vec::new()
            }))
    }

    async fn daily_summaries(
        &self,
        area: &SearchArea,
        start_date: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<Option<(WeatherStation, Vec<WeatherRecord>)>, RetrieveError> {
        let dataset = Dataset::DailySummaries;
        let stations = self
            .candidates(area, dataset, Some(summaries_window(start_date)), cancel)
            .await?;
        let found = first_valid(&stations, dataset, cancel, |station| {
            self.past_summaries(&station.id, start_date)
        })
        .await?;
        Ok(found.map(|(station, records)| (station.clone(), records)))
    }

    /// The summaries of `station_id` for each anniversary date, most recent first.
    /// `None` when a year has no data or the most recent year is incomplete.
    async fn past_summaries(
        &self,
        station_id: &str,
        start_date: NaiveDate,
    ) -> Result<Option<Vec<WeatherRecord>>, ProviderError> {
        let dataset = Dataset::DailySummaries;
        let mut records = Vec::with_capacity(PAST_YEARS as usize);
        for date in anniversary_dates(start_date) {
            let date = date.format("%Y-%m-%d").to_string();
            let request = ProviderRequest::data_access(station_id, dataset, &date, &date);
            let parsed = parse_record(&self.provider.fetch(&request).await?)?;
            if !parsed.mentions_any(dataset) {
                debug!("Station {} has no {} data for {}", station_id, dataset, date);
                return Ok(None);
            }
            records.push(parsed.record);
        }
        let valid = records
            .first()
            .is_some_and(|latest| latest.is_valid_for(dataset));
        Ok(valid.then_some(records))
    }

    async fn normals_daily(
        &self,
        area: &SearchArea,
        start_date: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<Option<(WeatherStation, WeatherRecord)>, RetrieveError> {
        let dataset = Dataset::NormalsDaily;
        let stations = self.candidates(area, dataset, None, cancel).await?;
        let date = normals_daily_date(start_date);
        let found = first_valid(&stations, dataset, cancel, |station| {
            self.normal(&station.id, dataset, &date)
        })
        .await?;
        Ok(found.map(|(station, record)| (station.clone(), record)))
    }

    /// Monthly normals of the station that produced the daily normals. Not searched
    /// elsewhere when that station lacks them.
    async fn normals_monthly(
        &self,
        station: &WeatherStation,
        start_date: NaiveDate,
    ) -> Option<WeatherRecord> {
        let date = normals_monthly_date(start_date);
        self.normal(&station.id, Dataset::NormalsMonthly, &date)
            .await
            .unwrap_or_else(|e| {
                warn!("Monthly normals of station {} failed: {}", station.id, e);
                None
            })
    }

    /// The normals record of `station_id` for `date`, when it is valid for `dataset`.
    async fn normal(
        &self,
        station_id: &str,
        dataset: Dataset,
        date: &str,
    ) -> Result<Option<WeatherRecord>, ProviderError> {
        let request = ProviderRequest::data_access(station_id, dataset, date, date);
        let parsed = parse_record(&self.provider.fetch(&request).await?)?;
        if !parsed.mentions_any(dataset) {
            debug!("Station {} has no {} data for {}", station_id, dataset, date);
            return Ok(None);
        }
        Ok(parsed
            .record
            .is_valid_for(dataset)
            .then_some(parsed.record))
    }
}

/// Search window of the daily summaries: from January 1st three years before the start
/// year to December 31st of the start year.
fn summaries_window(start_date: NaiveDate) -> (String, String) {
    let year = start_date.year();
    (
        format!("{:04}-01-01", year - PAST_YEARS as i32),
        format!("{:04}-12-31", year),
    )
}

/// `start_date` moved back 364, 728 and 1092 days.
fn anniversary_dates(start_date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (1..=PAST_YEARS).map(move |n| start_date - Duration::days(n * DAYS_PER_PAST_YEAR))
}

/// Month and day of `start_date` in the reference year, copied as text so that
/// February 29th stays February 29th.
fn normals_daily_date(start_date: NaiveDate) -> String {
    format!("{}-{}", NORMALS_REFERENCE_YEAR, start_date.format("%m-%d"))
}

fn normals_monthly_date(start_date: NaiveDate) -> String {
    format!("{}-{}-01", NORMALS_REFERENCE_YEAR, start_date.format("%m"))
}
