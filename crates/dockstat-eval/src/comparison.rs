//! Side-by-side comparison of named experiments.

use std::path::PathBuf;

use tracing::debug;

use dockstat_common::{DockstatError, ExperimentKey, MetricRecord, Result};

use crate::loader::{ExperimentResult, ResultLoader};
use crate::metrics::{MetricExtractor, COMPARISON_THRESHOLDS};
use crate::report::ComparisonTable;
use crate::separator;

pub const TABLE_TITLE: &str = "COMPARISON RESULTS";
pub const DETAILS_TITLE: &str = "INDIVIDUAL EXPERIMENT DETAILS";

#[derive(Debug, Clone)]
pub struct ComparisonOptions {
    pub results_dir: PathBuf,
    pub experiments: Vec<String>,
    pub output: PathBuf,
    /// Headline success threshold (Å); reported, not used for extraction.
    pub threshold: f64,
    pub thresholds: Vec<f64>,
}

impl ComparisonOptions {
    pub fn new(experiments: Vec<String>) -> Self {
        Self {
            results_dir: PathBuf::from("../results"),
            experiments,
            output: PathBuf::from("../tables/comparison.csv"),
            threshold: 2.0,
            thresholds: COMPARISON_THRESHOLDS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComparisonOutcome {
    pub experiments: Vec<ExperimentResult>,
    pub table: Option<ComparisonTable>,
    pub output_path: Option<PathBuf>,
}

/// Metrics for one loaded experiment; `None` when it has no evaluation data.
pub fn analyze_experiment(
    extractor: &MetricExtractor,
    experiment: &ExperimentResult,
) -> Option<MetricRecord> {
    extractor.extract(
        ExperimentKey::Name(experiment.name.clone()),
        experiment.data.as_ref(),
    )
}

/// Comparison table over every experiment with data; `None` if none has.
pub fn compare_experiments(
    extractor: &MetricExtractor,
    experiments: &[ExperimentResult],
) -> Option<ComparisonTable> {
    let records: Vec<MetricRecord> = experiments
        .iter()
        .filter_map(|e| analyze_experiment(extractor, e))
        .collect();
    ComparisonTable::from_records(records)
}

/// Load each named experiment, in order, skipping duplicates and missing ones.
pub fn load_experiments(loader: &ResultLoader, names: &[String]) -> Vec<ExperimentResult> {
    let mut experiments: Vec<ExperimentResult> = Vec::new();
    for name in names {
        if experiments.iter().any(|e| &e.name == name) {
            debug!("{} already loaded", name);
            continue;
        }
        println!("Loading {name}...");
        if let Some(experiment) = loader.load(name) {
            experiments.push(experiment);
        }
    }
    experiments
}

/// Run the comparison. Fails only if the results root itself is missing or
/// the output cannot be written.
pub fn run(options: &ComparisonOptions) -> Result<ComparisonOutcome> {
    if !options.results_dir.is_dir() {
        return Err(DockstatError::ResultsDirMissing(options.results_dir.clone()));
    }

    println!("Analyzing experiments: {:?}", options.experiments);
    println!("Results directory: {}", options.results_dir.display());
    println!();

    let loader = ResultLoader::new(&options.results_dir);
    let experiments = load_experiments(&loader, &options.experiments);

    if experiments.is_empty() {
        println!("No valid experiments found!");
        return Ok(ComparisonOutcome::default());
    }

    println!("\nLoaded {} experiments", experiments.len());
    println!();

    println!("Analyzing and comparing results...");
    println!("Success threshold: {} Å", options.threshold);
    let extractor = MetricExtractor::new(&options.thresholds);
    let table = compare_experiments(&extractor, &experiments);

    let output_path = match &table {
        Some(table) => {
            table.print(TABLE_TITLE, true);
            let path = table.write_csv(&options.output)?;
            println!("\nResults saved to: {}", path.display());
            Some(path)
        }
        None => {
            println!("Could not create comparison table");
            None
        }
    };

    print_details(&extractor, &experiments)?;

    Ok(ComparisonOutcome {
        experiments,
        table,
        output_path,
    })
}

fn print_details(extractor: &MetricExtractor, experiments: &[ExperimentResult]) -> Result<()> {
    println!("\n{}", separator());
    println!("{DETAILS_TITLE}");
    println!("{}", separator());

    for experiment in experiments {
        println!("\nExperiment: {}", experiment.name);
        println!("Path: {}", experiment.path.display());
        if let Some(eval_file) = &experiment.eval_file {
            println!("Evaluation file: {}", eval_file.display());
        }
        if let Some(log_file) = &experiment.log_file {
            println!("Log file: {}", log_file.display());
        }
        if let Some(record) = analyze_experiment(extractor, experiment) {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_results_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = ComparisonOptions::new(vec!["expA".into()]);
        options.results_dir = dir.path().join("absent");

        let err = run(&options).unwrap_err();
        assert!(matches!(err, DockstatError::ResultsDirMissing(_)));
    }

    #[test]
    fn test_experiment_without_data_is_not_analyzed() {
        let experiment = ExperimentResult {
            name: "expA".into(),
            path: PathBuf::from("results/expA"),
            data: None,
            eval_file: None,
            log_file: None,
        };
        let extractor = MetricExtractor::new(COMPARISON_THRESHOLDS);
        assert!(analyze_experiment(&extractor, &experiment).is_none());
        assert!(compare_experiments(&extractor, &[experiment]).is_none());
    }
}
