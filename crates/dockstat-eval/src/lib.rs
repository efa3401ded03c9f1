//! dockstat-eval — Report generation over docking evaluation results.
//!
//! The crate follows a single linear pass per invocation:
//! 1. Locating experiment directories and their evaluation CSVs ([`loader`])
//! 2. Parsing the per-complex table ([`table`])
//! 3. Extracting RMSD summary metrics ([`metrics`])
//! 4. Aggregating records into a comparison table ([`report`])
//! 5. Plotting the ablation sweep ([`plot`])
//!
//! [`ablation`] and [`comparison`] wire these steps into the two batch flows.

pub mod table;
pub mod loader;
pub mod stats;
pub mod metrics;
pub mod runtime;
pub mod report;
pub mod plot;
pub mod ablation;
pub mod comparison;

pub use dockstat_common::{DockstatError, Result};

/// Width of the `=` separator lines around printed tables.
pub const SEPARATOR_WIDTH: usize = 80;

pub(crate) fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}
