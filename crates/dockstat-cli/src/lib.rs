//! dockstat-cli — Argument parsing, configuration and logging shared by the
//! `analyze-ablation` and `analyze-results` binaries.

pub mod args;
pub mod config;
pub mod logging;
