mod astro;
mod error;
mod geo;
mod provider;
mod retriever;
mod search_area;
mod stations;
mod types;
mod utils;
mod weather_data;

#[cfg(test)]
mod test_support;

pub use error::TrackClimateError;

pub use geo::*;
pub use search_area::{SearchArea, MIN_SEARCH_RADIUS_M};

pub use types::bitflags::required_field::RequiredField;
pub use types::dataset::Dataset;
pub use types::station::WeatherStation;
pub use types::track::{Track, TrackPoint};
pub use types::weather_record::{RecordField, WeatherRecord};

pub use provider::client::{NoaaClient, WeatherProvider};
pub use provider::config::*;
pub use provider::error::ProviderError;
pub use provider::request::{Endpoint, ProviderRequest};

pub use stations::station_finder::{rank_stations, StationFinder};
pub use weather_data::record_parser::{parse_record, ParsedRecord};

pub use retriever::error::RetrieveError;
pub use retriever::historical::{HistoricalRetriever, HistoricalWeather, PAST_YEARS};
pub use retriever::progress::{ProgressCallback, RetrievalStage};

pub use astro::{Ephemeris, MoonPhase, WeatherSummary};

pub use utils::{truncate_to_hundredth, truncate_to_tenth};
