//! Unit normalization of raw station samples
//!
//! The backend feed mixes field aliases and units depending on which
//! firmware produced the sample. Each canonical field resolves from an
//! explicit ordered candidate list (first finite value wins), with the
//! unit conversion attached to the candidate that needs it.

use crate::types::{CanonicalRecord, FieldValue, RawSample, WindDirection};

/// mph -> km/h
pub const MPH_TO_KMH: f64 = 1.609344;

/// A bare `temperature` field carries no unit. Values at or above this
/// threshold are implausible as Celsius air temperature and are assumed
/// to be Fahrenheit. A genuine Celsius reading this high (sensor fault)
/// would be misconverted; accepted for feed compatibility.
pub const BARE_TEMP_FAHRENHEIT_THRESHOLD: f64 = 80.0;

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn mph_to_kmh(mph: f64) -> f64 {
    mph * MPH_TO_KMH
}

fn identity(v: f64) -> f64 {
    v
}

fn bare_temperature_to_celsius(v: f64) -> f64 {
    if v >= BARE_TEMP_FAHRENHEIT_THRESHOLD {
        fahrenheit_to_celsius(v)
    } else {
        v
    }
}

/// One candidate source field and its conversion into canonical units
struct Candidate {
    key: &'static str,
    convert: fn(f64) -> f64,
}

const TEMP_C: &[Candidate] = &[
    Candidate { key: "temp_c", convert: identity },
    Candidate { key: "temp_f", convert: fahrenheit_to_celsius },
    Candidate { key: "temperature", convert: bare_temperature_to_celsius },
];

const DEW_C: &[Candidate] = &[
    Candidate { key: "dew_c", convert: identity },
    Candidate { key: "dew_f", convert: fahrenheit_to_celsius },
];

const WIND_KMH: &[Candidate] = &[
    Candidate { key: "wind_kmh", convert: identity },
    Candidate { key: "wind_mph", convert: mph_to_kmh },
    Candidate { key: "wind_speed", convert: identity },
];

const GUST_KMH: &[Candidate] = &[
    Candidate { key: "gust_kmh", convert: identity },
    Candidate { key: "gust_mph", convert: mph_to_kmh },
    Candidate { key: "wind_gust", convert: identity },
];

const HUM_PCT: &[Candidate] = &[
    Candidate { key: "hum_pct", convert: identity },
    Candidate { key: "humidity", convert: identity },
    Candidate { key: "hum", convert: identity },
];

const RAIN_DAY_MM: &[Candidate] = &[
    Candidate { key: "rain_day_mm", convert: identity },
    Candidate { key: "rain_day", convert: identity },
    Candidate { key: "daily_rain", convert: identity },
    Candidate { key: "rainfall_daily", convert: identity },
];

const RAIN_RATE_MMH: &[Candidate] = &[
    Candidate { key: "rain_rate_mmh", convert: identity },
    Candidate { key: "rain_rate", convert: identity },
    Candidate { key: "rainrate", convert: identity },
];

const WIND_DIR_KEYS: &[&str] = &["wind_dir", "wind_direction"];

/// First finite candidate value, converted to canonical units
fn resolve(sample: &RawSample, candidates: &[Candidate]) -> Option<f64> {
    candidates
        .iter()
        .find_map(|c| sample.finite(c.key).map(c.convert))
}

fn resolve_wind_dir(sample: &RawSample) -> Option<WindDirection> {
    WIND_DIR_KEYS.iter().find_map(|key| match sample.value(key) {
        Some(FieldValue::Float(v)) if v.is_finite() => Some(WindDirection::Degrees(*v)),
        Some(FieldValue::Integer(v)) => Some(WindDirection::Degrees(*v as f64)),
        Some(FieldValue::Text(s)) if !s.is_empty() => Some(WindDirection::Compass(s.clone())),
        _ => None,
    })
}

/// Normalize one raw sample into a canonical record.
///
/// Returns `None` when the sample has no finite `ts`; such records are
/// dropped from the batch rather than aborting the run.
pub fn normalize(sample: &RawSample) -> Option<CanonicalRecord> {
    let ts = sample.timestamp_ms()?;

    Some(CanonicalRecord {
        ts,
        temp_c: resolve(sample, TEMP_C),
        hum_pct: resolve(sample, HUM_PCT),
        dew_c: resolve(sample, DEW_C),
        wind_kmh: resolve(sample, WIND_KMH),
        gust_kmh: resolve(sample, GUST_KMH),
        rain_day_mm: resolve(sample, RAIN_DAY_MM),
        rain_rate_mmh: resolve(sample, RAIN_RATE_MMH),
        wind_dir: resolve_wind_dir(sample),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(json: &str) -> RawSample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_ts_discards_record() {
        assert!(normalize(&sample(r#"{"temp_c":21.0}"#)).is_none());
        assert!(normalize(&sample(r#"{"ts":"soon","temp_c":21.0}"#)).is_none());
        assert!(normalize(&sample(r#"{"ts":null,"temp_c":21.0}"#)).is_none());
    }

    #[test]
    fn test_fahrenheit_conversion() {
        let rec = normalize(&sample(r#"{"ts":1,"temp_f":68.0}"#)).unwrap();
        assert!((rec.temp_c.unwrap() - 20.0).abs() < 0.01);

        let rec = normalize(&sample(r#"{"ts":1,"dew_f":32.0}"#)).unwrap();
        assert!((rec.dew_c.unwrap() - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_temp_c_wins_over_temp_f() {
        let rec = normalize(&sample(r#"{"ts":1,"temp_c":21.0,"temp_f":90.0}"#)).unwrap();
        assert_eq!(rec.temp_c, Some(21.0));
    }

    #[test]
    fn test_bare_temperature_heuristic() {
        // >= 80: implausible as Celsius, treated as Fahrenheit
        let rec = normalize(&sample(r#"{"ts":1,"temperature":82.0}"#)).unwrap();
        assert!((rec.temp_c.unwrap() - 27.78).abs() < 0.01);

        // below 80: taken as Celsius directly
        let rec = normalize(&sample(r#"{"ts":1,"temperature":22.0}"#)).unwrap();
        assert_eq!(rec.temp_c, Some(22.0));
    }

    #[test]
    fn test_wind_speed_conversion() {
        let rec = normalize(&sample(r#"{"ts":1,"wind_mph":10.0,"gust_mph":20.0}"#)).unwrap();
        assert!((rec.wind_kmh.unwrap() - 16.09344).abs() < 1e-9);
        assert!((rec.gust_kmh.unwrap() - 32.18688).abs() < 1e-9);

        // wind_speed / wind_gust are already km/h
        let rec = normalize(&sample(r#"{"ts":1,"wind_speed":12.5,"wind_gust":30.1}"#)).unwrap();
        assert_eq!(rec.wind_kmh, Some(12.5));
        assert_eq!(rec.gust_kmh, Some(30.1));
    }

    #[test]
    fn test_alias_precedence() {
        let rec = normalize(&sample(
            r#"{"ts":1,"hum":40,"humidity":50,"hum_pct":60,"daily_rain":3.0,"rain_day_mm":2.0}"#,
        ))
        .unwrap();
        assert_eq!(rec.hum_pct, Some(60.0));
        assert_eq!(rec.rain_day_mm, Some(2.0));
    }

    #[test]
    fn test_non_finite_values_become_unknown() {
        let rec = normalize(&sample(r#"{"ts":1,"temp_c":"21.0","humidity":null}"#)).unwrap();
        assert_eq!(rec.temp_c, None);
        assert_eq!(rec.hum_pct, None);
    }

    #[test]
    fn test_wind_dir_variants() {
        let rec = normalize(&sample(r#"{"ts":1,"wind_dir":270}"#)).unwrap();
        assert_eq!(rec.wind_dir, Some(WindDirection::Degrees(270.0)));

        let rec = normalize(&sample(r#"{"ts":1,"wind_direction":"NNW"}"#)).unwrap();
        assert_eq!(rec.wind_dir, Some(WindDirection::Compass("NNW".into())));

        let rec = normalize(&sample(r#"{"ts":1}"#)).unwrap();
        assert_eq!(rec.wind_dir, None);
    }
}
