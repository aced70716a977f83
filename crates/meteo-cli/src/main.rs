//! meteo-summarize - pre-aggregate raw station history into daily
//! summaries for the dashboard.

use anyhow::{Context, Result};
use tracing::info;

fn main() -> Result<()> {
    // Observability
    meteo_obs::init("meteo-summarize", "info,meteo=debug");

    // Config
    let cfg = meteo_config::AppConfig::load().context("failed to load configuration")?;

    let report = meteo_cli::run(&cfg)?;

    info!(
        samples = report.samples_read,
        kept = report.records_kept,
        recomputed = report.days_summarized,
        total = report.days_persisted,
        "daily summaries updated"
    );

    Ok(())
}
