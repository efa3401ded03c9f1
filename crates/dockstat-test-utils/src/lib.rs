//! Scratch results trees for tests.
//!
//! ```rust,no_run
//! use dockstat_test_utils::ResultsTree;
//!
//! let tree = ResultsTree::new();
//! tree.write_rmsd_column("expA", "rmsd_top1", &[Some(1.0), None]);
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary results root, removed on drop.
pub struct ResultsTree {
    dir: TempDir,
}

impl ResultsTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create (if needed) and return `<root>/<name>`.
    pub fn experiment(&self, name: &str) -> PathBuf {
        let path = self.root().join(name);
        std::fs::create_dir_all(&path).expect("Failed to create experiment dir");
        path
    }

    /// Write an arbitrary file into an experiment directory.
    pub fn write_file(&self, experiment: &str, file_name: &str, contents: &str) -> PathBuf {
        let path = self.experiment(experiment).join(file_name);
        std::fs::write(&path, contents).expect("Failed to write fixture");
        path
    }

    /// Write `<experiment>_evaluation.csv` with the given contents.
    pub fn write_evaluation(&self, experiment: &str, csv: &str) -> PathBuf {
        let file_name = format!("{}_evaluation.csv", experiment);
        self.write_file(experiment, &file_name, csv)
    }

    /// Write an evaluation CSV with a `complex` id column and one RMSD
    /// column; `None` is written as `nan`.
    pub fn write_rmsd_column(&self, experiment: &str, column: &str, values: &[Option<f64>]) -> PathBuf {
        self.write_evaluation(experiment, &rmsd_csv(column, values))
    }

    pub fn write_log(&self, experiment: &str, contents: &str) -> PathBuf {
        self.write_file(experiment, "inference.log", contents)
    }
}

impl Default for ResultsTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a two-column evaluation CSV (`complex`, `<column>`).
pub fn rmsd_csv(column: &str, values: &[Option<f64>]) -> String {
    let mut out = format!("complex,{}\n", column);
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => out.push_str(&format!("complex_{},{}\n", i, v)),
            None => out.push_str(&format!("complex_{},nan\n", i)),
        }
    }
    out
}
