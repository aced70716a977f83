//! Core data types for station readings and daily summaries

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Timestamp type (Unix epoch milliseconds)
pub type TimestampMs = i64;

/// Raw station sample as delivered by the backend API.
///
/// Field names and units vary across firmware revisions, so this is an
/// open mapping; `normalize::normalize` resolves it into a
/// [`CanonicalRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawSample {
    /// Sample fields (field name -> value)
    #[serde(flatten)]
    pub fields: HashMap<String, FieldValue>,
}

/// A raw field value with null handling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    Text(String),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Numeric view of the value; `None` for anything that is not a
    /// finite number (strings never coerce).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) if v.is_finite() => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl RawSample {
    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// First-class numeric lookup: `Some` only for finite values.
    pub fn finite(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(FieldValue::as_f64)
    }

    /// Sample timestamp in epoch milliseconds, if present and finite.
    pub fn timestamp_ms(&self) -> Option<TimestampMs> {
        self.finite("ts").map(|v| v as TimestampMs)
    }
}

/// Wind direction as reported: either degrees or a compass label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WindDirection {
    Degrees(f64),
    Compass(String),
}

/// One normalized instantaneous reading.
///
/// Invariant: every numeric field is either finite or `None` - never NaN,
/// never a string masquerading as a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalRecord {
    /// Epoch milliseconds of the reading
    pub ts: TimestampMs,

    pub temp_c: Option<f64>,
    pub hum_pct: Option<f64>,
    pub dew_c: Option<f64>,
    pub wind_kmh: Option<f64>,
    pub gust_kmh: Option<f64>,
    pub rain_day_mm: Option<f64>,
    pub rain_rate_mmh: Option<f64>,
    pub wind_dir: Option<WindDirection>,
}

impl CanonicalRecord {
    pub fn empty(ts: TimestampMs) -> Self {
        Self {
            ts,
            temp_c: None,
            hum_pct: None,
            dew_c: None,
            wind_kmh: None,
            gust_kmh: None,
            rain_day_mm: None,
            rain_rate_mmh: None,
            wind_dir: None,
        }
    }
}

/// Aggregate for one calendar day in the reference time zone.
///
/// Serialized with exactly these seven keys; unknown values stay explicit
/// `null` so downstream chart series keep their gaps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySummary {
    /// Day key, `YYYY-MM-DD` in the reference time zone
    pub day: String,

    pub temp_min_c: Option<f64>,
    pub temp_max_c: Option<f64>,
    pub temp_avg_c: Option<f64>,
    pub rain_mm: Option<f64>,
    pub gust_max_kmh: Option<f64>,
    pub wind_avg_kmh: Option<f64>,
}
