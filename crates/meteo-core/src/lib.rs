//! Canonical record types and numeric transforms for the MeteoValls
//! station feed.
//!
//! This crate owns the normalization path from heterogeneous raw samples
//! to canonical metric records, plus the pure calculations derived from
//! them (rain counter reconstruction, agronomic indices).

pub mod agro;
pub mod daybucket;
pub mod normalize;
pub mod plausibility;
pub mod rain;
pub mod types;

pub use agro::*;
pub use daybucket::*;
pub use normalize::*;
pub use plausibility::*;
pub use rain::*;
pub use types::*;
