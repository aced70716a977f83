//! Calendar-day bucketing in a named time zone
//!
//! Two distinct zone conventions exist by design: daily summaries bucket
//! in the station's reference zone, while same-day chart filtering uses
//! the display zone. Callers pass the zone they mean; nothing here
//! assumes a fixed UTC offset, so day keys stay correct across DST
//! transitions.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::types::TimestampMs;

/// Wall-clock `YYYY-MM-DD` of an instant in the given zone
pub fn day_key(ts_ms: TimestampMs, tz: Tz) -> Option<String> {
    let dt = tz.timestamp_millis_opt(ts_ms).single()?;
    Some(dt.format("%Y-%m-%d").to_string())
}

/// Epoch-millisecond bounds of a calendar day in the given zone:
/// 00:00:00.000 through 23:59:59.999
pub fn day_bounds(day: &str, tz: Tz) -> Option<(TimestampMs, TimestampMs)> {
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    let start = resolve_local(tz, date.and_hms_opt(0, 0, 0)?)?;
    let end = resolve_local(tz, date.and_hms_milli_opt(23, 59, 59, 999)?)?;
    Some((start.timestamp_millis(), end.timestamp_millis()))
}

/// Resolve a local wall-clock time to an instant. Ambiguous times (DST
/// fall-back) take the earlier offset; times skipped by a spring-forward
/// jump land on the first valid instant after the gap.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        }
    }
}
