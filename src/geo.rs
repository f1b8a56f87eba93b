//! Great-circle primitives on a spherical earth.
//!
//! Distances come from the `haversine` crate (mean radius 6371 km) and the
//! bearing/destination helpers below use the same radius, so a point produced by
//! [`travel`] lies at exactly the requested [`distance_m`] from its origin.

use haversine::{distance, Location as HaversineLocation, Units};
use serde::{Deserialize, Serialize};

/// Mean earth radius used by `haversine::Units::Kilometers`, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1),
/// both in decimal degrees.
///
/// # Examples
///
/// ```
/// use track_climate::LatLon;
///
/// let boulder = LatLon(40.0150, -105.2705);
/// assert_eq!(boulder.0, 40.0150); // Latitude
/// assert_eq!(boulder.1, -105.2705); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }

    pub fn longitude(self) -> f64 {
        self.1
    }

    /// True when both components are finite and inside the usual degree ranges.
    pub fn is_valid(self) -> bool {
        self.0.is_finite()
            && self.1.is_finite()
            && (-90.0..=90.0).contains(&self.0)
            && (-180.0..=180.0).contains(&self.1)
    }
}

/// Great-circle distance between two points, in meters.
pub fn distance_m(a: LatLon, b: LatLon) -> f64 {
    distance_km(a, b) * 1000.0
}

/// Great-circle distance between two points, in kilometers.
pub fn distance_km(a: LatLon, b: LatLon) -> f64 {
    distance(
        HaversineLocation {
            latitude: a.0,
            longitude: a.1,
        },
        HaversineLocation {
            latitude: b.0,
            longitude: b.1,
        },
        Units::Kilometers,
    )
}

/// Initial bearing (forward azimuth) from `from` towards `to`, in degrees `[0, 360)`.
///
/// Identical points yield `0.0`.
pub fn initial_bearing(from: LatLon, to: LatLon) -> f64 {
    let phi1 = from.0.to_radians();
    let phi2 = to.0.to_radians();
    let delta_lambda = (to.1 - from.1).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Point reached by travelling `distance_m` meters from `origin` along `bearing_deg`.
///
/// The resulting longitude is normalized to `[-180, 180]`.
pub fn travel(origin: LatLon, bearing_deg: f64, distance_m: f64) -> LatLon {
    let delta = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let phi1 = origin.0.to_radians();
    let lambda1 = origin.1.to_radians();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    LatLon(phi2.to_degrees(), normalize_longitude(lambda2.to_degrees()))
}

fn normalize_longitude(longitude: f64) -> f64 {
    (longitude + 540.0) % 360.0 - 180.0
}
