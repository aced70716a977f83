//! Rain counter reconstruction
//!
//! The station reports rain as a daily accumulating counter that resets
//! at midnight rollover, on sensor restarts, and after data gaps.
//! `reconstruct` turns that counter into a best-effort cumulative series
//! for the displayed period, independent of resets.

use chrono_tz::Tz;

use crate::daybucket::day_bounds;
use crate::types::{CanonicalRecord, TimestampMs};

/// Counter increments at or below this are treated as sensor noise (mm)
pub const RAIN_NOISE_THRESHOLD_MM: f64 = 0.05;

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Reconstruct cumulative rainfall from an ordered daily-counter series.
///
/// Unknown inputs stay unknown. The first valid counter value anchors the
/// series at 0. After that, a delta above the noise threshold is
/// accumulated and re-anchors; a non-positive delta is a counter reset and
/// re-anchors without subtracting; a sub-threshold positive delta does
/// neither, so noise-level drift never moves the anchor.
pub fn reconstruct(counters: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut prev: Option<f64> = None;
    let mut acc = 0.0;

    counters
        .iter()
        .map(|value| {
            let v = match value {
                Some(v) if v.is_finite() => *v,
                _ => return None,
            };

            match prev {
                None => {
                    prev = Some(v);
                    Some(0.0)
                }
                Some(p) => {
                    let dv = v - p;
                    if dv > RAIN_NOISE_THRESHOLD_MM {
                        acc += dv;
                        prev = Some(v);
                    } else if dv <= 0.0 {
                        // counter reset: re-anchor, never subtract
                        prev = Some(v);
                    }
                    Some(round3(acc))
                }
            }
        })
        .collect()
}

/// Cumulative rain series for one calendar day in the display zone, as
/// `(ts, mm)` pairs ready for chart rendering. Ephemeral; not persisted.
pub fn day_rain_series(
    records: &[CanonicalRecord],
    day: &str,
    display_tz: Tz,
) -> Vec<(TimestampMs, Option<f64>)> {
    let Some((start, end)) = day_bounds(day, display_tz) else {
        return Vec::new();
    };

    let mut day_records: Vec<&CanonicalRecord> = records
        .iter()
        .filter(|r| r.ts >= start && r.ts <= end)
        .collect();
    day_records.sort_by_key(|r| r.ts);

    let counters: Vec<Option<f64>> = day_records.iter().map(|r| r.rain_day_mm).collect();
    day_records
        .iter()
        .zip(reconstruct(&counters))
        .map(|(r, mm)| (r.ts, mm))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Madrid;

    #[test]
    fn test_reconstruct_reference_sequence() {
        // sub-threshold 0.02 ignored; reset at 1.0 ignored; 0.3 accumulated
        let input = [Some(2.0), Some(2.02), Some(2.5), Some(1.0), Some(1.3)];
        let out = reconstruct(&input);
        assert_eq!(
            out,
            vec![Some(0.0), Some(0.0), Some(0.5), Some(0.5), Some(0.8)]
        );
    }

    #[test]
    fn test_reconstruct_empty_and_unknowns() {
        assert_eq!(reconstruct(&[]), Vec::<Option<f64>>::new());
        assert_eq!(reconstruct(&[None, None]), vec![None, None]);

        // unknowns pass through without disturbing the accumulator
        let input = [Some(0.0), None, Some(1.0), None, Some(1.5)];
        let out = reconstruct(&input);
        assert_eq!(out, vec![Some(0.0), None, Some(1.0), None, Some(1.5)]);
    }

    #[test]
    fn test_reconstruct_first_valid_emits_zero() {
        let input = [None, Some(4.2)];
        assert_eq!(reconstruct(&input), vec![None, Some(0.0)]);
    }

    #[test]
    fn test_reconstruct_steady_counter_stays_flat() {
        let input = [Some(3.0), Some(3.0), Some(3.0)];
        assert_eq!(reconstruct(&input), vec![Some(0.0), Some(0.0), Some(0.0)]);
    }

    #[test]
    fn test_reconstruct_midnight_rollover() {
        // counter drops to zero at rollover, rain continues after
        let input = [Some(5.0), Some(5.2), Some(0.0), Some(0.4)];
        let out = reconstruct(&input);
        assert_eq!(out, vec![Some(0.0), Some(0.2), Some(0.2), Some(0.6)]);
    }

    fn record(ts: i64, rain: Option<f64>) -> CanonicalRecord {
        CanonicalRecord {
            rain_day_mm: rain,
            ..CanonicalRecord::empty(ts)
        }
    }

    #[test]
    fn test_day_rain_series_filters_and_orders() {
        let in_day = |h: u32, m: u32| {
            Madrid
                .with_ymd_and_hms(2024, 6, 15, h, m, 0)
                .unwrap()
                .timestamp_millis()
        };
        let day_before = Madrid
            .with_ymd_and_hms(2024, 6, 14, 23, 59, 0)
            .unwrap()
            .timestamp_millis();

        // out of order on purpose; the foreign-day record must be excluded
        let records = vec![
            record(in_day(10, 0), Some(1.5)),
            record(day_before, Some(99.0)),
            record(in_day(8, 0), Some(1.0)),
            record(in_day(12, 0), None),
        ];

        let series = day_rain_series(&records, "2024-06-15", Madrid);
        assert_eq!(
            series,
            vec![
                (in_day(8, 0), Some(0.0)),
                (in_day(10, 0), Some(0.5)),
                (in_day(12, 0), None),
            ]
        );
    }

    #[test]
    fn test_day_rain_series_bad_day_is_empty() {
        assert!(day_rain_series(&[], "not-a-day", Madrid).is_empty());
    }
}
