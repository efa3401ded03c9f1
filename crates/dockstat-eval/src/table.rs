//! In-memory evaluation table: one row per docked complex.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use dockstat_common::Result;

/// Cell spellings treated as not-a-number.
const MISSING_MARKERS: &[&str] = &["", "nan", "na", "n/a", "null", "none"];

/// A rectangular table of raw cells with named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl EvaluationTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parse an evaluation CSV from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!("Parsing evaluation table from {:?}", path);
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse an evaluation CSV. Short rows are padded with missing cells,
    /// surplus cells are dropped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().take(width).map(|c| c.to_string()).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of records, including rows with missing values.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Columns whose name contains `rmsd`, case-insensitively, as
    /// `(position, name)` pairs in table order.
    pub fn rmsd_columns(&self) -> Vec<(usize, &str)> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.to_lowercase().contains("rmsd"))
            .map(|(i, h)| (i, h.as_str()))
            .collect()
    }

    /// Numeric view of the column at `index`; see [`Self::numeric_column`].
    pub fn numeric_column_at(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.headers.len() {
            return None;
        }
        Some(self.rows.iter().map(|row| parse_cell(&row[index])).collect())
    }

    /// Numeric view of a column; missing or non-numeric cells become NaN.
    /// Returns `None` if the column does not exist.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        self.numeric_column_at(idx)
    }
}

fn parse_cell(raw: &str) -> f64 {
    let cell = raw.trim();
    if MISSING_MARKERS.contains(&cell.to_lowercase().as_str()) {
        return f64::NAN;
    }
    cell.parse::<f64>().unwrap_or(f64::NAN)
}
