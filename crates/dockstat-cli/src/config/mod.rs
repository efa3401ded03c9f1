//! Configuration loading for the report generators.
//! An optional TOML file supplies defaults; command-line flags override it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use dockstat_common::{DockstatError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ablation: AblationConfig,
    #[serde(default)]
    pub comparison: ComparisonConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AblationConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_steps")]
    pub steps: Vec<u32>,
    #[serde(default = "default_figures_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_ablation_thresholds")]
    pub thresholds: Vec<f64>,
    #[serde(default)]
    pub parse_runtime: bool,
    #[serde(default = "bool_true")]
    pub plot: bool,
}

fn default_results_dir()         -> PathBuf  { PathBuf::from("../results") }
fn default_steps()               -> Vec<u32> { vec![5, 10, 20, 40] }
fn default_figures_dir()         -> PathBuf  { PathBuf::from("../figures") }
fn default_ablation_thresholds() -> Vec<f64> { vec![2.0] }
fn bool_true()                   -> bool     { true }

impl Default for AblationConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            steps: default_steps(),
            output_dir: default_figures_dir(),
            thresholds: default_ablation_thresholds(),
            parse_runtime: false,
            plot: bool_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_comparison_output")]
    pub output: PathBuf,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_comparison_thresholds")]
    pub thresholds: Vec<f64>,
}

fn default_comparison_output()     -> PathBuf  { PathBuf::from("../tables/comparison.csv") }
fn default_threshold()             -> f64      { 2.0 }
fn default_comparison_thresholds() -> Vec<f64> { vec![2.0, 5.0] }

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            output: default_comparison_output(),
            threshold: default_threshold(),
            thresholds: default_comparison_thresholds(),
        }
    }
}


impl Config {
    /// Load configuration from `path`, or built-in defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Err(DockstatError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Thresholds must be positive and finite; the sweep needs at least one step.
    pub fn validate(&self) -> Result<()> {
        let thresholds = self
            .ablation
            .thresholds
            .iter()
            .chain(&self.comparison.thresholds)
            .chain(std::iter::once(&self.comparison.threshold));
        for t in thresholds {
            if !t.is_finite() || *t <= 0.0 {
                return Err(DockstatError::Config(format!(
                    "Invalid RMSD threshold: {t}"
                )));
            }
        }
        if self.ablation.steps.is_empty() {
            return Err(DockstatError::Config(
                "ablation.steps must list at least one step count".to_string(),
            ));
        }
        Ok(())
    }
}
