//! Inference-step ablation sweep.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use dockstat_common::{ExperimentKey, MetricRecord, Result};

use crate::loader::ResultLoader;
use crate::metrics::{MetricExtractor, ABLATION_THRESHOLDS};
use crate::plot;
use crate::report::ComparisonTable;
use crate::runtime::{self, RUNTIME_SECONDS};

pub const TABLE_FILE: &str = "ablation_inference_steps.csv";
pub const PLOT_FILE: &str = "ablation_inference_steps.png";
pub const TABLE_TITLE: &str = "ABLATION STUDY RESULTS: Inference Steps";

/// Inputs of one ablation run.
#[derive(Debug, Clone)]
pub struct AblationOptions {
    pub results_dir: PathBuf,
    pub steps: Vec<u32>,
    pub output_dir: PathBuf,
    pub thresholds: Vec<f64>,
    pub parse_runtime: bool,
    pub plot: bool,
}

impl Default for AblationOptions {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("../results"),
            steps: vec![5, 10, 20, 40],
            output_dir: PathBuf::from("../figures"),
            thresholds: ABLATION_THRESHOLDS.to_vec(),
            parse_runtime: false,
            plot: true,
        }
    }
}

/// What an ablation run produced. Both paths are `None` for an empty batch.
#[derive(Debug, Clone, Default)]
pub struct AblationOutcome {
    pub table: Option<ComparisonTable>,
    pub table_path: Option<PathBuf>,
    pub plot_path: Option<PathBuf>,
}

/// Load and summarise every requested step count that has data on disk.
pub fn collect_records(options: &AblationOptions) -> Vec<MetricRecord> {
    let loader = ResultLoader::new(&options.results_dir);
    let extractor = MetricExtractor::new(&options.thresholds);
    let mut records = Vec::new();

    for &steps in &dedup_steps(&options.steps) {
        let Some(experiment) = loader.load_ablation_step(steps) else {
            continue;
        };
        let Some(mut record) =
            extractor.extract(ExperimentKey::Steps(steps), experiment.data.as_ref())
        else {
            continue;
        };

        if let Some(log_file) = &experiment.log_file {
            record.insert("log_file", log_file.display().to_string());
            if options.parse_runtime {
                if let Some(seconds) = runtime::parse_runtime_file(log_file) {
                    record.insert(RUNTIME_SECONDS, seconds);
                }
            }
        }

        debug!("Steps {}: {} metrics", steps, record.len());
        records.push(record);
    }

    records
}

fn dedup_steps(steps: &[u32]) -> Vec<u32> {
    let mut seen = Vec::with_capacity(steps.len());
    for &s in steps {
        if seen.contains(&s) {
            warn!("Step count {} requested more than once", s);
        } else {
            seen.push(s);
        }
    }
    seen
}

/// Run the sweep: print the table, save CSV and figure under `output_dir`.
pub fn run(options: &AblationOptions) -> Result<AblationOutcome> {
    println!("Ablation Study Analysis");
    println!("Results directory: {}", options.results_dir.display());
    println!("Testing inference steps: {:?}", options.steps);
    println!("Output directory: {}", options.output_dir.display());
    println!();

    let records = collect_records(options);
    let Some(mut table) = ComparisonTable::from_records(records) else {
        println!("No valid results found!");
        return Ok(AblationOutcome::default());
    };
    table.sort_by_key();
    table.print(TABLE_TITLE, false);

    let table_path = table.write_csv(&options.output_dir.join(TABLE_FILE))?;
    println!("\nTable saved to: {}", table_path.display());

    let plot_path = if options.plot {
        let path = plot::plot_ablation(&table, &options.output_dir.join(PLOT_FILE))?;
        if let Some(path) = &path {
            println!("Plot saved to: {}", path.display());
        }
        path
    } else {
        info!("Plotting disabled");
        None
    };

    Ok(AblationOutcome {
        table: Some(table),
        table_path: Some(table_path),
        plot_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_order() {
        assert_eq!(dedup_steps(&[20, 5, 20, 10, 5]), vec![20, 5, 10]);
    }

    #[test]
    fn test_default_options() {
        let options = AblationOptions::default();
        assert_eq!(options.steps, vec![5, 10, 20, 40]);
        assert_eq!(options.thresholds, vec![2.0]);
        assert_eq!(options.results_dir, PathBuf::from("../results"));
    }
}
