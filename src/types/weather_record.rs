use crate::types::bitflags::required_field::RequiredField;
use crate::types::dataset::Dataset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The canonical fields a provider record is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Date,
    TemperatureMax,
    TemperatureMin,
    TemperatureAverage,
    Precipitation,
}

impl RecordField {
    /// The completeness flag matching this field. `Date` has none.
    pub fn required_flag(self) -> RequiredField {
        match self {
            RecordField::Date => RequiredField::NONE,
            RecordField::TemperatureMax => RequiredField::TEMPERATURE_MAX,
            RecordField::TemperatureMin => RequiredField::TEMPERATURE_MIN,
            RecordField::TemperatureAverage => RequiredField::TEMPERATURE_AVERAGE,
            RecordField::Precipitation => RequiredField::PRECIPITATION,
        }
    }
}

/// One dated observation or one climate normal, values kept as the provider's text
/// (metric units: °C and mm).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub date: Option<NaiveDate>,
    pub temperature_max: Option<String>,
    pub temperature_min: Option<String>,
    pub temperature_average: Option<String>,
    pub precipitation: Option<String>,
}

impl WeatherRecord {
    /// Raw value of a measurement field. Always `None` for [`RecordField::Date`].
    pub fn value(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::Date => None,
            RecordField::TemperatureMax => self.temperature_max.as_deref(),
            RecordField::TemperatureMin => self.temperature_min.as_deref(),
            RecordField::TemperatureAverage => self.temperature_average.as_deref(),
            RecordField::Precipitation => self.precipitation.as_deref(),
        }
    }

    /// Stores a raw measurement value. `Date` is ignored here; it is set from a parsed date.
    pub(crate) fn set_value(&mut self, field: RecordField, raw: String) {
        let slot = match field {
            RecordField::Date => return,
            RecordField::TemperatureMax => &mut self.temperature_max,
            RecordField::TemperatureMin => &mut self.temperature_min,
            RecordField::TemperatureAverage => &mut self.temperature_average,
            RecordField::Precipitation => &mut self.precipitation,
        };
        *slot = Some(raw);
    }

    /// Parsed numeric value of a measurement field, if present and numeric.
    pub fn numeric(&self, field: RecordField) -> Option<f64> {
        self.value(field).and_then(|v| v.trim().parse().ok())
    }

    /// Checks if all fields specified in `required` are present and non-blank.
    pub fn has_required_fields(&self, required: RequiredField) -> bool {
        [
            RecordField::TemperatureMax,
            RecordField::TemperatureMin,
            RecordField::TemperatureAverage,
            RecordField::Precipitation,
        ]
        .into_iter()
        .filter(|field| required.contains(field.required_flag()))
        .all(|field| self.value(field).is_some_and(|v| !v.trim().is_empty()))
    }

    /// Completeness predicate of `dataset` applied to this record.
    pub fn is_valid_for(&self, dataset: Dataset) -> bool {
        self.has_required_fields(dataset.required_fields())
    }

    /// True when at least one measurement field is present.
    pub fn has_any_measurement(&self) -> bool {
        self.temperature_max.is_some()
            || self.temperature_min.is_some()
            || self.temperature_average.is_some()
            || self.precipitation.is_some()
    }
}
