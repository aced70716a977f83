//! Daily aggregation and summary-set merging
//!
//! Reduces batches of canonical records to per-day statistical summaries
//! and upserts them into the persisted summary history. Aggregation is
//! pure and infallible: data-quality problems surface as unknown fields,
//! never as errors.

pub mod aggregator;
pub mod merge;

pub use aggregator::*;
pub use merge::*;
