//! Keyed upsert of daily summaries into the persisted history

use std::collections::BTreeMap;

use tracing::debug;

use meteo_core::types::DaySummary;

/// Merge freshly computed summaries into the persisted set.
///
/// Every day present in `fresh` fully replaces the existing entry for
/// that key (whole-record replace, no field-level merge); days absent
/// from `fresh` are left untouched, so coverage only ever grows. The
/// result is sorted by day key descending (most recent first).
///
/// Idempotent: applying the same fresh set twice yields the same output.
pub fn merge_summaries(
    existing: Vec<DaySummary>,
    fresh: BTreeMap<String, DaySummary>,
) -> Vec<DaySummary> {
    let mut by_day: BTreeMap<String, DaySummary> = existing
        .into_iter()
        .map(|summary| (summary.day.clone(), summary))
        .collect();

    let recomputed = fresh.len();
    for (day, summary) in fresh {
        by_day.insert(day, summary);
    }

    debug!(recomputed, total = by_day.len(), "merged summary set");

    // BTreeMap iterates ascending by day key; flip for newest-first
    by_day.into_values().rev().collect()
}
