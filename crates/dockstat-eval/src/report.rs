//! Aggregating metric records into a wide comparison table.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use dockstat_common::{ExperimentKey, MetricRecord, MetricValue, Result};

use crate::separator;

/// Placeholder shown for missing cells in console output.
const MISSING_DISPLAY: &str = "NaN";

/// Rows are experiments, columns are the union of metric names in order of
/// first appearance. The key column always comes first.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    key_column: String,
    columns: Vec<String>,
    rows: Vec<MetricRecord>,
}

impl ComparisonTable {
    /// Build a table from records. Returns `None` for an empty batch.
    ///
    /// Records repeating an earlier key are dropped.
    pub fn from_records(records: Vec<MetricRecord>) -> Option<Self> {
        let key_column = records.first()?.key.column_name().to_string();

        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<MetricRecord> = Vec::with_capacity(records.len());

        for record in records {
            if rows.iter().any(|r| r.key == record.key) {
                warn!("Duplicate entry for {}, keeping the first", record.key);
                continue;
            }
            for name in record.names() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
            rows.push(record);
        }

        Some(Self {
            key_column,
            columns,
            rows,
        })
    }

    /// Sort rows ascending by key; stable for equal keys.
    pub fn sort_by_key(&mut self) {
        self.rows.sort_by(|a, b| a.key.cmp(&b.key));
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Metric columns, excluding the key column.
    pub fn metric_columns(&self) -> &[String] {
        &self.columns
    }

    /// Full header: key column followed by metric columns.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(self.key_column.as_str())
            .chain(self.columns.iter().map(|c| c.as_str()))
            .collect()
    }

    pub fn rows(&self) -> &[MetricRecord] {
        &self.rows
    }

    pub fn keys(&self) -> Vec<&ExperimentKey> {
        self.rows.iter().map(|r| &r.key).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by row index and column name (key column included).
    pub fn cell(&self, row: usize, column: &str) -> Option<MetricValue> {
        let record = self.rows.get(row)?;
        if column == self.key_column {
            return Some(record.key.as_value());
        }
        record.get(column).cloned()
    }

    /// `(key, value)` pairs for a numeric column; rows missing the column
    /// are omitted.
    pub fn numeric_series(&self, column: &str) -> Vec<(&ExperimentKey, f64)> {
        self.rows
            .iter()
            .filter_map(|r| {
                r.get(column)
                    .and_then(MetricValue::as_f64)
                    .map(|v| (&r.key, v))
            })
            .collect()
    }

    /// Fixed-width, right-aligned rendering.
    pub fn render(&self, show_index: bool) -> String {
        let header = self.header();
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(self.rows.len() + 1);

        let mut head: Vec<String> = Vec::new();
        if show_index {
            head.push(String::new());
        }
        head.extend(header.iter().map(|h| h.to_string()));
        grid.push(head);

        for i in 0..self.rows.len() {
            let mut line: Vec<String> = Vec::new();
            if show_index {
                line.push(i.to_string());
            }
            line.extend(header.iter().map(|column| {
                self.cell(i, column)
                    .map(|v| v.to_display())
                    .unwrap_or_else(|| MISSING_DISPLAY.to_string())
            }));
            grid.push(line);
        }

        let n_cols = grid[0].len();
        let widths: Vec<usize> = (0..n_cols)
            .map(|c| grid.iter().map(|line| line[c].chars().count()).max().unwrap_or(0))
            .collect();

        grid.iter()
            .map(|line| {
                line.iter()
                    .zip(&widths)
                    .enumerate()
                    .map(|(c, (cell, &width))| {
                        if show_index && c == 0 {
                            format!("{cell:<width$}")
                        } else {
                            format!("{cell:>width$}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Print the table between separator lines under a title.
    pub fn print(&self, title: &str, show_index: bool) {
        println!("\n{}", separator());
        println!("{title}");
        println!("{}", separator());
        println!("{}", self.render(show_index));
        println!("{}", separator());
    }

    /// Write the table as CSV without an index column, creating parent
    /// directories. Missing cells are left blank.
    pub fn write_csv(&self, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let header = self.header();
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&header)?;
        for i in 0..self.rows.len() {
            let fields: Vec<String> = header
                .iter()
                .map(|column| {
                    self.cell(i, column)
                        .map(|v| v.to_csv_field())
                        .unwrap_or_default()
                })
                .collect();
            writer.write_record(&fields)?;
        }
        writer.flush()?;

        debug!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(path.to_path_buf())
    }
}
