//! Folds a data access response into a single [`WeatherRecord`].
//!
//! The provider may split one date over several objects, each carrying a subset of
//! the data types. Every object is applied in order: a non-blank value sets its field,
//! a blank or missing value leaves the field as it is.

use crate::provider::error::ProviderError;
use crate::types::dataset::Dataset;
use crate::types::weather_record::{RecordField, WeatherRecord};
use crate::utils::is_iso_date;
use chrono::NaiveDate;
use serde_json::Value;

/// Provider keys and the canonical field each of them fills. Matched case-insensitively.
const FIELD_KEYS: &[(&str, RecordField)] = &[
    ("DATE", RecordField::Date),
    // Daily summaries
    ("TMAX", RecordField::TemperatureMax),
    ("TMIN", RecordField::TemperatureMin),
    ("TAVG", RecordField::TemperatureAverage),
    ("PRCP", RecordField::Precipitation),
    // Daily normals
    ("DLY-TMAX-NORMAL", RecordField::TemperatureMax),
    ("DLY-TMIN-NORMAL", RecordField::TemperatureMin),
    ("DLY-TAVG-NORMAL", RecordField::TemperatureAverage),
    // Monthly normals
    ("MLY-TMAX-NORMAL", RecordField::TemperatureMax),
    ("MLY-TMIN-NORMAL", RecordField::TemperatureMin),
    ("MLY-TAVG-NORMAL", RecordField::TemperatureAverage),
];

/// A folded response plus the recognized data types it mentioned, blank or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRecord {
    pub record: WeatherRecord,
    mentioned: Vec<&'static str>,
}

impl ParsedRecord {
    /// True when the response named at least one of the data types of `dataset`.
    /// A response naming none of them carries no data for the request.
    pub fn mentions_any(&self, dataset: Dataset) -> bool {
        dataset
            .data_types()
            .iter()
            .any(|data_type| self.mentioned.contains(data_type))
    }

    fn apply(mut self, entry: &serde_json::Map<String, Value>) -> Self {
        for (key, value) in entry {
            let Some((name, field)) = lookup(key) else {
                continue;
            };
            if !self.mentioned.contains(&name) {
                self.mentioned.push(name);
            }
            let Some(raw) = as_text(value).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            match field {
                RecordField::Date => {
                    if let Some(date) = parse_full_date(&raw) {
                        self.record.date = Some(date);
                    }
                }
                _ => self.record.set_value(field, raw),
            }
        }
        self
    }
}

fn lookup(key: &str) -> Option<(&'static str, RecordField)> {
    FIELD_KEYS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key.trim()))
        .copied()
}

/// Strings as-is, numbers in their JSON text form. Anything else counts as blank.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Only full `YYYY-MM-DD` values set the date; normals dates such as `07-14` do not.
fn parse_full_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if !is_iso_date(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Parses a data access response body.
///
/// # Errors
///
/// Returns [`ProviderError::JsonParse`] when the body is not a JSON array. Non-object
/// elements of the array are ignored.
pub fn parse_record(body: &[u8]) -> Result<ParsedRecord, ProviderError> {
    let entries: Vec<Value> = serde_json::from_slice(body)?;
    Ok(entries
        .iter()
        .filter_map(Value::as_object)
        .fold(ParsedRecord::default(), ParsedRecord::apply))
}
