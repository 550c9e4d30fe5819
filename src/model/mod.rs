//! Aggregation model: fold parsed lines into stage totals, then normalize
//! those totals into a percentage breakdown.
//!
//! Two labels get special treatment and must not be confused:
//! - [`IGNORED_STAGE`] is dropped entirely (it is the backend banner, not a timing).
//! - [`EXCLUDED_FROM_TOTAL`] is kept as an absolute value but never enters the
//!   percentage denominator.

pub mod breakdown;
pub mod totals;

pub use breakdown::{Breakdown, normalize};
pub use totals::{StageAggregator, StageTotals};

/// Banner line announcing which storage backend served the run.
pub const IGNORED_STAGE: &str = "Using bake backend";

/// Raw file-scan stage, reported as an absolute measurement.
pub const EXCLUDED_FROM_TOTAL: &str = "scan_file";

/// Fractions are truncated (floored) to this many decimals before scaling to percent.
pub const PERCENT_DECIMALS: i32 = 5;
