//! Walks candidate stations until one yields usable data.

use crate::provider::error::ProviderError;
use crate::retriever::error::RetrieveError;
use crate::types::dataset::Dataset;
use crate::types::station::WeatherStation;
use log::{debug, info, warn};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Tries `stations` in order and stops at the first one whose attempt returns `Some`.
///
/// An attempt failing with a [`ProviderError`] is logged and counts as "no usable
/// data", like `None`. `cancel` is checked before every attempt.
///
/// Returns `Ok(None)` once every station was tried without success.
pub(crate) async fn first_valid<'a, T, F, Fut>(
    stations: &'a [WeatherStation],
    dataset: Dataset,
    cancel: &CancellationToken,
    mut attempt: F,
) -> Result<Option<(&'a WeatherStation, T)>, RetrieveError>
where
    F: FnMut(&'a WeatherStation) -> Fut,
    Fut: Future<Output = Result<Option<T>, ProviderError>>,
{
    for (index, station) in stations.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(
                "Retrieval cancelled before trying {} station {} ({}/{})",
                dataset,
                station.id,
                index + 1,
                stations.len()
            );
            return Err(RetrieveError::Cancelled);
        }
        match attempt(station).await {
            Ok(Some(value)) => {
                info!(
                    "Using {} station {} ({}) at {} km from the start",
                    dataset, station.id, station.name, station.distance_from_start
                );
                return Ok(Some((station, value)));
            }
            Ok(None) => debug!("{} station {} has no valid data", dataset, station.id),
            Err(e) => warn!("{} station {} failed: {}", dataset, station.id, e),
        }
    }
    info!(
        "No valid {} data among {} candidate station(s)",
        dataset,
        stations.len()
    );
    Ok(None)
}
