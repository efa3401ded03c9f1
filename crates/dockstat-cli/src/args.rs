//! Command-line surfaces of the two report generators.
//!
//! Every option is optional at the clap level so that a config file can
//! supply it; resolution is flag, then config, then built-in default.

use std::path::PathBuf;

use clap::Parser;

use dockstat_eval::ablation::AblationOptions;
use dockstat_eval::comparison::ComparisonOptions;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "analyze-ablation", version, about = "Analyze ablation study results")]
pub struct AblationArgs {
    /// Directory containing experiment results [default: ../results]
    #[arg(long, alias = "results_dir")]
    pub results_dir: Option<PathBuf>,

    /// List of inference steps tested [default: 5 10 20 40]
    #[arg(long, num_args = 1..)]
    pub steps: Option<Vec<u32>>,

    /// Directory for output figures and tables [default: ../figures]
    #[arg(long, alias = "output_dir")]
    pub output_dir: Option<PathBuf>,

    /// Extract wall-clock runtime from each step's log file
    #[arg(long, alias = "parse_runtime")]
    pub parse_runtime: bool,

    /// Skip the figure
    #[arg(long)]
    pub no_plot: bool,

    /// TOML file with default settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl AblationArgs {
    pub fn resolve(self, config: &Config) -> AblationOptions {
        let cfg = &config.ablation;
        AblationOptions {
            results_dir: self.results_dir.unwrap_or_else(|| cfg.results_dir.clone()),
            steps: self.steps.unwrap_or_else(|| cfg.steps.clone()),
            output_dir: self.output_dir.unwrap_or_else(|| cfg.output_dir.clone()),
            thresholds: cfg.thresholds.clone(),
            parse_runtime: self.parse_runtime || cfg.parse_runtime,
            plot: cfg.plot && !self.no_plot,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "analyze-results", version, about = "Analyze DiffDock experiment results")]
pub struct ComparisonArgs {
    /// Directory containing experiment results [default: ../results]
    #[arg(long, alias = "results_dir")]
    pub results_dir: Option<PathBuf>,

    /// List of experiment names to analyze
    #[arg(long, num_args = 1.., required = true)]
    pub experiments: Vec<String>,

    /// Output file for comparison table [default: ../tables/comparison.csv]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// RMSD threshold for success rate in Angstroms [default: 2.0]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// TOML file with default settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ComparisonArgs {
    pub fn resolve(self, config: &Config) -> ComparisonOptions {
        let cfg = &config.comparison;
        ComparisonOptions {
            results_dir: self.results_dir.unwrap_or_else(|| cfg.results_dir.clone()),
            experiments: self.experiments,
            output: self.output.unwrap_or_else(|| cfg.output.clone()),
            threshold: self.threshold.unwrap_or(cfg.threshold),
            thresholds: cfg.thresholds.clone(),
        }
    }
}
