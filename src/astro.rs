//! Daylight and moon illumination shown next to the historical weather.
//!
//! The astronomical computations belong to an external library, reached through the
//! [`Ephemeris`] trait. This module only classifies and assembles their results.

use crate::geo::LatLon;
use crate::retriever::historical::HistoricalWeather;
use crate::types::track::Track;
use crate::utils::truncate_to_hundredth;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Source of sun and moon data for a place and time.
pub trait Ephemeris {
    /// Sunrise and sunset on `date` at `location`, local wall-clock time. `None` during
    /// polar day or night.
    fn sun_times(&self, date: NaiveDate, location: LatLon) -> Option<(NaiveDateTime, NaiveDateTime)>;

    /// Illuminated fraction of the moon at `at`, in `[0, 1]`.
    fn moon_illumination(&self, at: NaiveDateTime) -> f64;
}

/// Phase of the moon derived from its illuminated fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Classifies an illuminated fraction already truncated to two decimals.
    ///
    /// Quarter and full phases only match their exact value. Anything outside the
    /// ranges, `0.0` included, is a waning crescent.
    pub fn from_fraction(fraction: f64) -> Self {
        match fraction {
            f if f > 0.0 && f < 0.1 => MoonPhase::New,
            f if (0.1..0.25).contains(&f) => MoonPhase::WaxingCrescent,
            f if f == 0.25 => MoonPhase::FirstQuarter,
            f if f > 0.25 && f < 0.5 => MoonPhase::WaxingGibbous,
            f if f == 0.5 => MoonPhase::Full,
            f if f > 0.5 && f < 0.75 => MoonPhase::WaningGibbous,
            f if f == 0.75 => MoonPhase::LastQuarter,
            _ => MoonPhase::WaningCrescent,
        }
    }

    /// File name of the icon for this phase.
    pub fn icon_name(&self) -> &'static str {
        match self {
            MoonPhase::New => "moon-new.png",
            MoonPhase::WaxingCrescent => "moon-waxing-crescent.png",
            MoonPhase::FirstQuarter => "moon-first-quarter.png",
            MoonPhase::WaxingGibbous => "moon-waxing-gibbous.png",
            MoonPhase::Full => "moon-full.png",
            MoonPhase::WaningGibbous => "moon-waning-gibbous.png",
            MoonPhase::LastQuarter => "moon-last-quarter.png",
            MoonPhase::WaningCrescent => "moon-waning-crescent.png",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoonPhase::New => "New moon",
            MoonPhase::WaxingCrescent => "Waxing crescent",
            MoonPhase::FirstQuarter => "First quarter",
            MoonPhase::WaxingGibbous => "Waxing gibbous",
            MoonPhase::Full => "Full moon",
            MoonPhase::WaningGibbous => "Waning gibbous",
            MoonPhase::LastQuarter => "Last quarter",
            MoonPhase::WaningCrescent => "Waning crescent",
        };
        f.write_str(name)
    }
}

/// Historical weather plus the astronomy of the track's start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub weather: HistoricalWeather,
    /// Time between sunrise and sunset on the start date.
    pub daylight: Option<Duration>,
    /// Illuminated fraction at the start time, truncated to two decimals.
    pub moon_fraction: f64,
}

impl WeatherSummary {
    pub fn assemble(weather: HistoricalWeather, track: &Track, ephemeris: &impl Ephemeris) -> Self {
        let daylight = track
            .start_point()
            .and_then(|start| ephemeris.sun_times(track.start_date(), start))
            .and_then(|(sunrise, sunset)| (sunset - sunrise).to_std().ok());
        let moon_fraction = truncate_to_hundredth(ephemeris.moon_illumination(track.start_time));
        Self {
            weather,
            daylight,
            moon_fraction,
        }
    }

    pub fn moon_phase(&self) -> MoonPhase {
        MoonPhase::from_fraction(self.moon_fraction)
    }

    /// Daylight as `HH:MM`, if known.
    pub fn daylight_hours(&self) -> Option<String> {
        self.daylight.map(|d| {
            let minutes = d.as_secs() / 60;
            format!("{:02}:{:02}", minutes / 60, minutes % 60)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::boulder_track;

    struct FixedEphemeris {
        sun: Option<(NaiveDateTime, NaiveDateTime)>,
        illumination: f64,
    }

    impl Ephemeris for FixedEphemeris {
        fn sun_times(&self, _: NaiveDate, _: LatLon) -> Option<(NaiveDateTime, NaiveDateTime)> {
            self.sun
        }

        fn moon_illumination(&self, _: NaiveDateTime) -> f64 {
            self.illumination
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 7, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(MoonPhase::from_fraction(0.05), MoonPhase::New);
        assert_eq!(MoonPhase::from_fraction(0.1), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_fraction(0.25), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_fraction(0.3), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::from_fraction(0.5), MoonPhase::Full);
        assert_eq!(MoonPhase::from_fraction(0.74), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::from_fraction(0.75), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_fraction(0.9), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::from_fraction(0.0), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::Full.icon_name(), "moon-full.png");
    }

    #[test]
    fn test_assemble() {
        let ephemeris = FixedEphemeris {
            sun: Some((at(5, 41), at(20, 29))),
            illumination: 0.5099,
        };
        let summary = WeatherSummary::assemble(HistoricalWeather::default(), &boulder_track(), &ephemeris);

        assert_eq!(summary.daylight, Some(Duration::from_secs((14 * 60 + 48) * 60)));
        assert_eq!(summary.daylight_hours().as_deref(), Some("14:48"));
        assert_eq!(summary.moon_fraction, 0.5);
        assert_eq!(summary.moon_phase(), MoonPhase::Full);
    }

    #[test]
    fn test_polar_day_has_no_daylight_duration() {
        let ephemeris = FixedEphemeris {
            sun: None,
            illumination: 0.0,
        };
        let summary = WeatherSummary::assemble(HistoricalWeather::default(), &boulder_track(), &ephemeris);
        assert_eq!(summary.daylight, None);
        assert_eq!(summary.daylight_hours(), None);
    }
}
