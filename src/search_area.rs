//! Derives the geographic area used to look for weather stations around a track.
//!
//! The area is the circle whose diameter joins the start point and the track point
//! furthest from it. This covers most of an arbitrarily shaped route using only its
//! two extreme points. The radius never drops below [`MIN_SEARCH_RADIUS_M`] so that
//! short or looping tracks still find candidate stations.

use crate::geo::{distance_m, initial_bearing, travel, LatLon};
use crate::retriever::error::RetrieveError;
use crate::types::track::Track;
use crate::utils::format_coordinate;
use serde::{Deserialize, Serialize};

/// Smallest radius a search area may have, in meters.
pub const MIN_SEARCH_RADIUS_M: f64 = 100_000.0;

const SOUTH_WEST_BEARING: f64 = 225.0;
const NORTH_EAST_BEARING: f64 = 45.0;

/// A search circle and the bounding box corners sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchArea {
    /// First point of the track.
    pub start: LatLon,
    pub center: LatLon,
    /// Radius in meters, at least [`MIN_SEARCH_RADIUS_M`].
    pub radius_m: f64,
    /// `center` moved `radius_m` along 225°.
    pub south_west: LatLon,
    /// `center` moved `radius_m` along 45°.
    pub north_east: LatLon,
}

impl SearchArea {
    /// Computes the search area of `track`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieveError::EmptyTrack`] when the track has no points.
    pub fn from_track(track: &Track) -> Result<Self, RetrieveError> {
        let start = track.start_point().ok_or(RetrieveError::EmptyTrack)?;
        let furthest = furthest_point(start, track.points.iter().map(|p| p.lat_lon()));

        let span = distance_m(start, furthest);
        let bearing = initial_bearing(start, furthest);
        let center = travel(start, bearing, span / 2.0);

        Ok(Self::around(start, center, span / 2.0))
    }

    /// Builds an area around `center`, applying the minimum radius.
    pub fn around(start: LatLon, center: LatLon, radius_m: f64) -> Self {
        let radius_m = radius_m.max(MIN_SEARCH_RADIUS_M);
        Self {
            start,
            center,
            radius_m,
            south_west: travel(center, SOUTH_WEST_BEARING, radius_m),
            north_east: travel(center, NORTH_EAST_BEARING, radius_m),
        }
    }

    /// The `boundingBox` parameter: `swLat,swLon,neLat,neLon`, each with at most four
    /// fraction digits and no grouping separators.
    pub fn extent(&self) -> String {
        [
            self.south_west.0,
            self.south_west.1,
            self.north_east.0,
            self.north_east.1,
        ]
        .map(format_coordinate)
        .join(",")
    }
}

/// The first point with the greatest distance from `start`; `start` itself if no point
/// is further away.
fn furthest_point(start: LatLon, points: impl Iterator<Item = LatLon>) -> LatLon {
    let mut furthest = start;
    let mut max_distance = 0.0;
    for point in points {
        let d = distance_m(start, point);
        if d > max_distance {
            max_distance = d;
            furthest = point;
        }
    }
    furthest
}
