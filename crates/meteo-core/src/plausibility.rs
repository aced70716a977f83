//! Plausibility bounds for canonical readings
//!
//! Out-of-range values are forced to unknown rather than clamped, so a
//! stuck sensor reads as a gap instead of a plateau. The daily rain
//! counter is the one exception: an implausible counter becomes 0 so the
//! cumulative-delta reconstruction keeps a valid anchor.

use crate::types::CanonicalRecord;

/// Inclusive plausibility range for one field
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

pub const TEMP_C_BOUNDS: Bounds = Bounds::new(-20.0, 55.0);
pub const HUM_PCT_BOUNDS: Bounds = Bounds::new(0.0, 100.0);
pub const DEW_C_BOUNDS: Bounds = Bounds::new(-40.0, 35.0);
pub const WIND_KMH_BOUNDS: Bounds = Bounds::new(0.0, 150.0);
pub const GUST_KMH_BOUNDS: Bounds = Bounds::new(0.0, 200.0);
pub const RAIN_DAY_MM_BOUNDS: Bounds = Bounds::new(0.0, 500.0);

fn bounded(value: Option<f64>, bounds: Bounds) -> Option<f64> {
    value.filter(|v| bounds.contains(*v))
}

/// Apply plausibility bounds to a record, forcing out-of-range fields to
/// unknown. `rain_rate_mmh` and `wind_dir` pass through unchecked.
pub fn filter_record(record: CanonicalRecord) -> CanonicalRecord {
    let rain_day_mm = match record.rain_day_mm {
        Some(v) if RAIN_DAY_MM_BOUNDS.contains(v) => Some(v),
        // implausible counter: zero, not unknown
        Some(_) => Some(0.0),
        None => None,
    };

    CanonicalRecord {
        temp_c: bounded(record.temp_c, TEMP_C_BOUNDS),
        hum_pct: bounded(record.hum_pct, HUM_PCT_BOUNDS),
        dew_c: bounded(record.dew_c, DEW_C_BOUNDS),
        wind_kmh: bounded(record.wind_kmh, WIND_KMH_BOUNDS),
        gust_kmh: bounded(record.gust_kmh, GUST_KMH_BOUNDS),
        rain_day_mm,
        ..record
    }
}
