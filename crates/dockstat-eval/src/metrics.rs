//! RMSD metric extraction from an evaluation table.

use tracing::{debug, warn};

use dockstat_common::{ExperimentKey, MetricRecord};

use crate::stats;
use crate::table::EvaluationTable;

/// Success thresholds (Å) reported by the ablation sweep.
pub const ABLATION_THRESHOLDS: &[f64] = &[2.0];

/// Success thresholds (Å) reported by the experiment comparison.
pub const COMPARISON_THRESHOLDS: &[f64] = &[2.0, 5.0];

/// Metric holding the number of rows in the evaluation table.
pub const NUM_COMPLEXES: &str = "num_complexes";

/// Renders a threshold as a column suffix: `2.0` → `2A`, `2.5` → `2.5A`.
pub fn threshold_label(threshold: f64) -> String {
    if threshold.fract() == 0.0 && threshold.abs() < 1e9 {
        format!("{}A", threshold as i64)
    } else {
        format!("{threshold}A")
    }
}

/// Computes per-column RMSD summaries.
#[derive(Debug, Clone)]
pub struct MetricExtractor {
    thresholds: Vec<f64>,
}

impl MetricExtractor {
    pub fn new(thresholds: &[f64]) -> Self {
        Self {
            thresholds: thresholds.to_vec(),
        }
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Extract metrics for one experiment. No table, no record.
    pub fn extract(&self, key: ExperimentKey, table: Option<&EvaluationTable>) -> Option<MetricRecord> {
        table.map(|t| self.extract_table(key, t))
    }

    /// `num_complexes`, then for every RMSD column with at least one valid
    /// value: mean, median and one success rate per threshold.
    pub fn extract_table(&self, key: ExperimentKey, table: &EvaluationTable) -> MetricRecord {
        let mut record = MetricRecord::new(key);
        record.insert(NUM_COMPLEXES, table.num_rows());

        let mut seen: Vec<&str> = Vec::new();
        for (index, column) in table.rmsd_columns() {
            if seen.contains(&column) {
                warn!("Repeated column {} at position {}, ignoring it", column, index);
                continue;
            }
            seen.push(column);

            let Some(raw) = table.numeric_column_at(index) else {
                continue;
            };
            let values = stats::finite_values(&raw);
            if values.is_empty() {
                debug!("Column {} has no valid values, skipping", column);
                continue;
            }

            if let Some(mean) = stats::mean(&values) {
                record.insert(format!("{column}_mean"), mean);
            }
            if let Some(median) = stats::median(&values) {
                record.insert(format!("{column}_median"), median);
            }
            for &threshold in &self.thresholds {
                if let Some(rate) = stats::success_rate(&values, threshold) {
                    record.insert(
                        format!("{column}_success_{}", threshold_label(threshold)),
                        rate,
                    );
                }
            }
        }

        record
    }
}

impl Default for MetricExtractor {
    fn default() -> Self {
        Self::new(ABLATION_THRESHOLDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockstat_common::MetricValue;
    use pretty_assertions::assert_eq;

    fn table(csv: &str) -> EvaluationTable {
        EvaluationTable::from_reader(csv.as_bytes()).unwrap()
    }

    fn float(record: &MetricRecord, name: &str) -> f64 {
        record.get(name).and_then(MetricValue::as_f64).unwrap()
    }

    #[test]
    fn test_threshold_label() {
        assert_eq!(threshold_label(2.0), "2A");
        assert_eq!(threshold_label(5.0), "5A");
        assert_eq!(threshold_label(2.5), "2.5A");
    }

    #[test]
    fn test_single_column_with_missing_value() {
        let t = table("complex,rmsd_top1\n1abc,1.0\n2abc,3.0\n3abc,1.5\n4abc,nan\n");
        let record = MetricExtractor::new(ABLATION_THRESHOLDS)
            .extract_table(ExperimentKey::Name("expA".into()), &t);

        assert_eq!(record.get(NUM_COMPLEXES), Some(&MetricValue::Int(4)));
        assert!((float(&record, "rmsd_top1_mean") - 5.5 / 3.0).abs() < 1e-12);
        assert_eq!(float(&record, "rmsd_top1_median"), 1.5);
        assert!((float(&record, "rmsd_top1_success_2A") - 200.0 / 3.0).abs() < 1e-9);
        assert!(!record.contains("rmsd_top1_success_5A"));
    }

    #[test]
    fn test_metric_order() {
        let t = table("rmsd_top1,score,rmsd_top5\n1.0,0.3,0.5\n6.0,0.1,4.0\n");
        let record = MetricExtractor::new(COMPARISON_THRESHOLDS)
            .extract_table(ExperimentKey::Name("exp".into()), &t);
        let names: Vec<_> = record.names().collect();

        assert_eq!(
            names,
            vec![
                "num_complexes",
                "rmsd_top1_mean",
                "rmsd_top1_median",
                "rmsd_top1_success_2A",
                "rmsd_top1_success_5A",
                "rmsd_top5_mean",
                "rmsd_top5_median",
                "rmsd_top5_success_2A",
                "rmsd_top5_success_5A",
            ]
        );
        assert_eq!(float(&record, "rmsd_top1_success_5A"), 50.0);
        assert_eq!(float(&record, "rmsd_top5_success_5A"), 100.0);
    }

    #[test]
    fn test_all_missing_column_is_skipped() {
        let t = table("rmsd_top1,rmsd_top5\n1.0,\n2.0,nan\n");
        let record = MetricExtractor::default().extract_table(ExperimentKey::Steps(10), &t);

        assert!(record.contains("rmsd_top1_mean"));
        assert!(!record.names().any(|n| n.starts_with("rmsd_top5")));
    }

    #[test]
    fn test_repeated_header_keeps_first_column() {
        let t = table("rmsd,rmsd\n1.0,7.0\n3.0,9.0\n");
        let record = MetricExtractor::default().extract_table(ExperimentKey::Steps(10), &t);

        assert_eq!(float(&record, "rmsd_mean"), 2.0);
        assert_eq!(float(&record, "rmsd_success_2A"), 50.0);
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_empty_table() {
        let t = table("complex,rmsd_top1\n");
        let record = MetricExtractor::default().extract_table(ExperimentKey::Steps(5), &t);

        assert_eq!(record.get(NUM_COMPLEXES), Some(&MetricValue::Int(0)));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_absent_table_yields_nothing() {
        let extractor = MetricExtractor::default();
        assert!(extractor.extract(ExperimentKey::Steps(5), None).is_none());
    }
}
