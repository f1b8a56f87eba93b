pub(crate) mod search_result;
pub mod station_finder;
