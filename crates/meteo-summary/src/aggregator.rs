//! Daily aggregation of canonical records

use std::collections::BTreeMap;

use chrono_tz::Tz;
use tracing::debug;

use meteo_core::daybucket::day_key;
use meteo_core::types::{CanonicalRecord, DaySummary};

/// Accumulator for one observation series within a day
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    values: Vec<f64>,
}

impl Accumulator {
    pub fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.values.push(v);
        }
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn avg(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().sum();
        Some(sum / self.values.len() as f64)
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }
}

#[derive(Debug, Default)]
struct DayAccumulator {
    temp: Accumulator,
    wind: Accumulator,
    gust: Accumulator,
    rain: Accumulator,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

impl DayAccumulator {
    fn add(&mut self, record: &CanonicalRecord) {
        self.temp.add(record.temp_c);
        self.wind.add(record.wind_kmh);
        self.gust.add(record.gust_kmh);
        self.rain.add(record.rain_day_mm);
    }

    fn into_summary(self, day: String) -> DaySummary {
        DaySummary {
            day,
            temp_min_c: self.temp.min().map(round1),
            temp_max_c: self.temp.max().map(round1),
            temp_avg_c: self.temp.avg().map(round1),
            // the daily counter is non-decreasing within a day (resets
            // are filtered upstream), so its max is the day total
            rain_mm: self.rain.max().map(round1),
            gust_max_kmh: self.gust.max().map(round1),
            wind_avg_kmh: self.wind.avg().map(round1),
        }
    }
}

/// Partition records by calendar day in the reference zone and reduce
/// each partition to a [`DaySummary`]. Fields with no valid samples stay
/// unknown, never 0.
pub fn summarize_days(records: &[CanonicalRecord], tz: Tz) -> BTreeMap<String, DaySummary> {
    let mut days: BTreeMap<String, DayAccumulator> = BTreeMap::new();

    for record in records {
        let Some(day) = day_key(record.ts, tz) else {
            continue;
        };
        days.entry(day).or_default().add(record);
    }

    debug!(days = days.len(), records = records.len(), "aggregated batch");

    days.into_iter()
        .map(|(day, acc)| (day.clone(), acc.into_summary(day)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Madrid;

    #[test]
    fn test_accumulator_min_max_avg() {
        let mut acc = Accumulator::default();
        acc.add(Some(10.0));
        acc.add(None);
        acc.add(Some(20.0));

        assert_eq!(acc.min(), Some(10.0));
        assert_eq!(acc.max(), Some(20.0));
        assert_eq!(acc.avg(), Some(15.0));
        assert_eq!(acc.count(), 2);
    }

    #[test]
    fn test_accumulator_empty() {
        let acc = Accumulator::default();
        assert_eq!(acc.min(), None);
        assert_eq!(acc.max(), None);
        assert_eq!(acc.avg(), None);
    }

    fn at(day: u32, hour: u32) -> i64 {
        Madrid
            .with_ymd_and_hms(2024, 6, day, hour, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn record(ts: i64, temp_c: Option<f64>) -> CanonicalRecord {
        CanonicalRecord {
            temp_c,
            ..CanonicalRecord::empty(ts)
        }
    }

    #[test]
    fn test_two_sample_day_summary() {
        let records = vec![
            record(at(15, 6), Some(10.0)),
            record(at(15, 14), Some(20.0)),
        ];
        let days = summarize_days(&records, Madrid);

        let summary = &days["2024-06-15"];
        assert_eq!(summary.temp_min_c, Some(10.0));
        assert_eq!(summary.temp_max_c, Some(20.0));
        assert_eq!(summary.temp_avg_c, Some(15.0));
        assert_eq!(summary.rain_mm, None);
    }

    #[test]
    fn test_partitioning_by_reference_day() {
        let records = vec![
            record(at(15, 23), Some(18.0)),
            record(at(16, 1), Some(16.0)),
        ];
        let days = summarize_days(&records, Madrid);

        assert_eq!(days.len(), 2);
        assert_eq!(days["2024-06-15"].temp_avg_c, Some(18.0));
        assert_eq!(days["2024-06-16"].temp_avg_c, Some(16.0));
    }

    #[test]
    fn test_rain_is_counter_max_and_gust_is_max() {
        let mut a = record(at(15, 8), None);
        a.rain_day_mm = Some(1.2);
        a.gust_kmh = Some(30.0);
        let mut b = record(at(15, 18), None);
        b.rain_day_mm = Some(4.6);
        b.gust_kmh = Some(55.5);

        let days = summarize_days(&[a, b], Madrid);
        let summary = &days["2024-06-15"];
        assert_eq!(summary.rain_mm, Some(4.6));
        assert_eq!(summary.gust_max_kmh, Some(55.5));
        // no valid temperature samples: unknown, never 0
        assert_eq!(summary.temp_avg_c, None);
    }

    #[test]
    fn test_one_decimal_rounding() {
        let records = vec![
            record(at(15, 6), Some(10.01)),
            record(at(15, 14), Some(20.06)),
        ];
        let days = summarize_days(&records, Madrid);
        assert_eq!(days["2024-06-15"].temp_min_c, Some(10.0));
        assert_eq!(days["2024-06-15"].temp_max_c, Some(20.1));
    }
}
