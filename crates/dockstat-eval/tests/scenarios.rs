//! End-to-end runs of both flows over scratch results trees.

use dockstat_common::{ExperimentKey, MetricValue};
use dockstat_eval::ablation::{self, AblationOptions};
use dockstat_eval::comparison::{self, ComparisonOptions};
use dockstat_eval::loader::ResultLoader;
use dockstat_eval::metrics::{MetricExtractor, ABLATION_THRESHOLDS};
use dockstat_test_utils::ResultsTree;
use pretty_assertions::assert_eq;

fn ablation_options(tree: &ResultsTree, steps: Vec<u32>) -> AblationOptions {
    AblationOptions {
        results_dir: tree.root().to_path_buf(),
        steps,
        output_dir: tree.root().join("figures"),
        plot: false,
        ..AblationOptions::default()
    }
}

fn comparison_options(tree: &ResultsTree, experiments: &[&str]) -> ComparisonOptions {
    let mut options = ComparisonOptions::new(experiments.iter().map(|s| s.to_string()).collect());
    options.results_dir = tree.root().to_path_buf();
    options.output = tree.root().join("tables").join("comparison.csv");
    options
}

#[test]
fn test_single_experiment_metrics() {
    let tree = ResultsTree::new();
    tree.write_rmsd_column("expA", "rmsd_top1", &[Some(1.0), Some(3.0), Some(1.5), None]);

    let experiment = ResultLoader::new(tree.root()).load("expA").unwrap();
    let record = MetricExtractor::new(ABLATION_THRESHOLDS)
        .extract(ExperimentKey::Name("expA".into()), experiment.data.as_ref())
        .unwrap();

    assert_eq!(record.get("num_complexes"), Some(&MetricValue::Int(4)));
    let mean = record.get("rmsd_top1_mean").and_then(MetricValue::as_f64).unwrap();
    let median = record.get("rmsd_top1_median").and_then(MetricValue::as_f64).unwrap();
    let success = record.get("rmsd_top1_success_2A").and_then(MetricValue::as_f64).unwrap();
    assert!((mean - 1.833_333_333).abs() < 1e-6);
    assert_eq!(median, 1.5);
    assert!((success - 66.67).abs() < 0.01);
}

#[test]
fn test_ablation_skips_missing_step() {
    let tree = ResultsTree::new();
    tree.write_rmsd_column("ablation_steps10", "rmsd_top1", &[Some(1.0), Some(2.5)]);

    let outcome = ablation::run(&ablation_options(&tree, vec![5, 10])).unwrap();
    let table = outcome.table.unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.keys(), vec![&ExperimentKey::Steps(10)]);
    assert!(outcome.table_path.unwrap().exists());
}

#[test]
fn test_ablation_renders_figure() {
    let tree = ResultsTree::new();
    tree.write_rmsd_column("ablation_steps5", "rmsd_top1", &[Some(1.0), Some(4.0), Some(2.5)]);
    tree.write_rmsd_column("ablation_steps10", "rmsd_top1", &[Some(0.8), Some(1.2), None]);

    let options = AblationOptions {
        plot: true,
        ..ablation_options(&tree, vec![5, 10])
    };
    let outcome = ablation::run(&options).unwrap();

    let expected = options.output_dir.join("ablation_inference_steps.png");
    assert_eq!(outcome.plot_path, Some(expected.clone()));
    assert!(expected.exists());
    assert!(std::fs::metadata(&expected).unwrap().len() > 0);
}

#[test]
fn test_ablation_without_2a_column_skips_figure() {
    let tree = ResultsTree::new();
    tree.write_rmsd_column("ablation_steps5", "rmsd_top1", &[Some(1.0), Some(4.0)]);
    tree.write_rmsd_column("ablation_steps10", "rmsd_top1", &[Some(0.8), Some(6.0)]);

    let options = AblationOptions {
        plot: true,
        thresholds: vec![5.0],
        ..ablation_options(&tree, vec![5, 10])
    };
    let outcome = ablation::run(&options).unwrap();

    assert!(outcome.table_path.unwrap().exists());
    assert_eq!(outcome.plot_path, None);
    assert!(!options.output_dir.join("ablation_inference_steps.png").exists());
}

#[test]
fn test_ablation_sorted_with_log_and_runtime() {
    let tree = ResultsTree::new();
    tree.write_rmsd_column("ablation_steps40", "rmsd_top1", &[Some(0.5)]);
    tree.write_rmsd_column("ablation_steps5", "rmsd_top1", &[Some(4.0)]);
    tree.write_log("ablation_steps5", "loading\nTotal time: 2 min\n");

    let mut options = ablation_options(&tree, vec![40, 5]);
    options.parse_runtime = true;
    let outcome = ablation::run(&options).unwrap();
    let table = outcome.table.unwrap();

    assert_eq!(
        table.keys(),
        vec![&ExperimentKey::Steps(5), &ExperimentKey::Steps(40)]
    );
    assert_eq!(table.cell(0, "runtime_seconds"), Some(MetricValue::Float(120.0)));
    assert!(table.cell(0, "log_file").is_some());
    assert_eq!(table.cell(1, "log_file"), None);
}

#[test]
fn test_empty_evaluation_table() {
    let tree = ResultsTree::new();
    tree.write_evaluation("ablation_steps20", "complex,rmsd_top1\n");

    let outcome = ablation::run(&ablation_options(&tree, vec![20])).unwrap();
    let table = outcome.table.unwrap();

    assert_eq!(table.cell(0, "num_complexes"), Some(MetricValue::Int(0)));
    assert_eq!(table.header(), vec!["inference_steps", "num_complexes"]);
}

#[test]
fn test_comparison_blank_for_missing_metric() {
    let tree = ResultsTree::new();
    tree.write_rmsd_column("baseline", "rmsd_top1", &[Some(1.0), Some(6.0)]);
    tree.write_evaluation("no_rmsd", "complex,confidence\nc0,0.9\n");

    let options = comparison_options(&tree, &["baseline", "no_rmsd"]);
    let outcome = comparison::run(&options).unwrap();
    let table = outcome.table.unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(1, "rmsd_top1_success_2A"), None);

    let written = std::fs::read_to_string(outcome.output_path.unwrap()).unwrap();
    assert_eq!(
        written,
        "experiment,num_complexes,rmsd_top1_mean,rmsd_top1_median,rmsd_top1_success_2A,rmsd_top1_success_5A\n\
         baseline,2,3.5,3.5,50.0,50.0\n\
         no_rmsd,1,,,,\n"
    );
}

#[test]
fn test_no_experiments_writes_nothing() {
    let tree = ResultsTree::new();

    let options = comparison_options(&tree, &["absent_a", "absent_b"]);
    let outcome = comparison::run(&options).unwrap();
    assert!(outcome.table.is_none());
    assert!(!options.output.exists());

    let ablation = ablation_options(&tree, vec![5, 10]);
    let outcome = ablation::run(&ablation).unwrap();
    assert!(outcome.table_path.is_none());
    assert!(!ablation.output_dir.exists());
}

#[test]
fn test_experiment_without_evaluation_writes_nothing() {
    let tree = ResultsTree::new();
    tree.write_log("expA", "Total time: 10 s\n");

    let options = comparison_options(&tree, &["expA"]);
    let outcome = comparison::run(&options).unwrap();

    assert_eq!(outcome.experiments.len(), 1);
    assert!(outcome.table.is_none());
    assert!(!options.output.exists());
}

#[test]
fn test_rerun_is_byte_identical() {
    let tree = ResultsTree::new();
    tree.write_rmsd_column("expA", "rmsd_top1", &[Some(1.25), Some(7.0), None]);
    tree.write_rmsd_column("expB", "rmsd_top1", &[Some(0.3)]);

    let options = comparison_options(&tree, &["expB", "expA"]);
    comparison::run(&options).unwrap();
    let first = std::fs::read(&options.output).unwrap();
    comparison::run(&options).unwrap();
    let second = std::fs::read(&options.output).unwrap();

    assert_eq!(first, second);
}
