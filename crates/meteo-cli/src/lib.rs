//! Batch summary run: read raw history, normalize, aggregate by day,
//! merge into the persisted summary set, write it back.
//!
//! One run is strictly sequential and idempotent; any failure before the
//! final write leaves the persisted store untouched.

use anyhow::{Context, Result};
use tracing::{info, warn};

use meteo_config::AppConfig;
use meteo_core::types::CanonicalRecord;
use meteo_core::{normalize, plausibility};
use meteo_summary::{merge_summaries, summarize_days};

/// Counters from one batch run, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Raw samples read from the history file
    pub samples_read: usize,
    /// Records surviving normalization (finite timestamp)
    pub records_kept: usize,
    /// Days recomputed in this run
    pub days_summarized: usize,
    /// Total days in the persisted set after merging
    pub days_persisted: usize,
}

/// Execute one batch summary run against the configured paths.
pub fn run(cfg: &AppConfig) -> Result<RunReport> {
    let tz = cfg.timezone().context("invalid station timezone")?;
    let history_path = cfg.history_path();
    let summaries_path = cfg.summaries_path();

    let samples =
        meteo_store::load_samples(&history_path).context("failed to read raw history")?;
    let samples_read = samples.len();

    let records: Vec<CanonicalRecord> = samples
        .iter()
        .filter_map(normalize::normalize)
        .map(plausibility::filter_record)
        .collect();
    let records_kept = records.len();

    let dropped = samples_read - records_kept;
    if dropped > 0 {
        warn!(dropped, "dropped samples without a usable timestamp");
    }

    let fresh = summarize_days(&records, tz);
    let days_summarized = fresh.len();

    let existing = meteo_store::load_summaries(&summaries_path)
        .context("failed to read persisted summaries")?;

    let merged = merge_summaries(existing, fresh);
    let days_persisted = merged.len();

    meteo_store::save_summaries(&summaries_path, &merged)
        .context("failed to write summary store")?;

    info!(
        samples_read,
        records_kept, days_summarized, days_persisted, "batch summary run complete"
    );

    Ok(RunReport {
        samples_read,
        records_kept,
        days_summarized,
        days_persisted,
    })
}
