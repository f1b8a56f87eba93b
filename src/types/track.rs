//! The recorded GPS track a retrieval is performed for.

use crate::geo::LatLon;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One GPS fix of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn lat_lon(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

impl From<LatLon> for TrackPoint {
    fn from(value: LatLon) -> Self {
        Self::new(value.0, value.1)
    }
}

/// An ordered sequence of fixes plus the time the activity starts.
///
/// The track is read-only input: retrieval borrows it and never keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Fixes in recording order. The first one is the start point.
    pub points: Vec<TrackPoint>,
    /// Local wall-clock time at the start point.
    pub start_time: NaiveDateTime,
}

impl Track {
    pub fn new(points: Vec<TrackPoint>, start_time: NaiveDateTime) -> Self {
        Self { points, start_time }
    }

    pub fn start_point(&self) -> Option<LatLon> {
        self.points.first().map(TrackPoint::lat_lon)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
