//! JSON file persistence for raw history and daily summaries
//!
//! A missing file reads as an empty collection (first run bootstraps the
//! store); an unparseable file is an error, since overwriting it would
//! destroy history. Writes go through a temp file in the target
//! directory plus a rename, so a failed run leaves the prior state
//! untouched.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use meteo_core::types::{DaySummary, RawSample};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store file {path}: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    if !path.exists() {
        warn!(path = %path.display(), "store file missing, starting empty");
        return Ok(Vec::new());
    }

    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
        path: path.display().to_string(),
        source,
    })
}

/// Load raw station samples. Missing file reads as an empty batch.
pub fn load_samples(path: &Path) -> StoreResult<Vec<RawSample>> {
    let samples = load_json(path)?;
    debug!(path = %path.display(), count = samples.len(), "loaded raw samples");
    Ok(samples)
}

/// Load the persisted daily-summary set. Missing file reads as empty.
pub fn load_summaries(path: &Path) -> StoreResult<Vec<DaySummary>> {
    let summaries = load_json(path)?;
    debug!(path = %path.display(), count = summaries.len(), "loaded summaries");
    Ok(summaries)
}

/// Persist the summary set as a pretty JSON array, atomically.
pub fn save_summaries(path: &Path, summaries: &[DaySummary]) -> StoreResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let json = serde_json::to_string_pretty(summaries).map_err(|source| StoreError::Corrupt {
        path: path.display().to_string(),
        source,
    })?;

    // write-then-rename keeps the old file intact on failure
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), count = summaries.len(), "saved summaries");
    Ok(())
}
