pub mod bitflags;
pub mod dataset;
pub mod station;
pub mod track;
pub mod weather_record;
