//! dockstat-common — Shared types and errors used across the dockstat crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{ExperimentKey, MetricRecord, MetricValue};
pub use error::{DockstatError, Result};
