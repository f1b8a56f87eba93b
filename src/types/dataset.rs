//! Defines the provider datasets a retrieval draws on and what each of them must
//! contain to be usable.

use crate::types::bitflags::required_field::RequiredField;
use std::fmt;

/// A NOAA dataset queried during retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Observed daily values (GHCN-Daily): max/min temperature and precipitation.
    DailySummaries,
    /// 30-year climate normals for one day of the year.
    NormalsDaily,
    /// 30-year climate normals for one month.
    NormalsMonthly,
}

impl Dataset {
    /// Identifier used in the `dataset` query parameter.
    pub fn id(&self) -> &'static str {
        match self {
            Dataset::DailySummaries => "daily-summaries",
            Dataset::NormalsDaily => "normals-daily",
            Dataset::NormalsMonthly => "normals-monthly",
        }
    }

    /// Data types requested from the data access endpoint, in query order.
    pub fn data_types(&self) -> &'static [&'static str] {
        match self {
            Dataset::DailySummaries => &["TMAX", "TMIN", "PRCP"],
            Dataset::NormalsDaily => &["DLY-TMAX-NORMAL", "DLY-TMIN-NORMAL", "DLY-TAVG-NORMAL"],
            Dataset::NormalsMonthly => &["MLY-TMAX-NORMAL", "MLY-TMIN-NORMAL", "MLY-TAVG-NORMAL"],
        }
    }

    /// Completeness rule a record of this dataset has to satisfy.
    ///
    /// Monthly normals are never validated: they are only fetched for a station that
    /// already produced valid daily normals.
    pub fn required_fields(&self) -> RequiredField {
        match self {
            Dataset::DailySummaries => {
                RequiredField::TEMPERATURE_MAX
                    | RequiredField::TEMPERATURE_MIN
                    | RequiredField::PRECIPITATION
            }
            Dataset::NormalsDaily => {
                RequiredField::TEMPERATURE_MAX
                    | RequiredField::TEMPERATURE_MIN
                    | RequiredField::TEMPERATURE_AVERAGE
            }
            Dataset::NormalsMonthly => RequiredField::NONE,
        }
    }
}

/// Formats a `Dataset` using its provider identifier.
///
/// # Examples
///
/// ```
/// use track_climate::Dataset;
///
/// assert_eq!(Dataset::NormalsDaily.to_string(), "normals-daily");
/// ```
impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
