//! Locating experiment directories and the files they contain.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::table::EvaluationTable;

/// A file-name pattern of the form `*<contains>*.<extension>`.
#[derive(Debug, Clone, Copy)]
pub struct FilePattern {
    pub contains: Option<&'static str>,
    pub extension: &'static str,
}

/// `*evaluation*.csv`
pub const EVALUATION_PATTERN: FilePattern = FilePattern {
    contains: Some("evaluation"),
    extension: "csv",
};

/// `*.log`
pub const LOG_PATTERN: FilePattern = FilePattern {
    contains: None,
    extension: "log",
};

impl FilePattern {
    /// Hidden files never match, as with shell globbing.
    pub fn matches(&self, file_name: &str) -> bool {
        if file_name.starts_with('.') {
            return false;
        }
        let Some(stem) = file_name.strip_suffix(self.extension) else {
            return false;
        };
        let Some(stem) = stem.strip_suffix('.') else {
            return false;
        };
        self.contains.map_or(true, |needle| stem.contains(needle))
    }
}

/// First regular file in `dir` matching `pattern`, in lexicographic order.
pub fn find_first_matching(dir: &Path, pattern: FilePattern) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Could not list {:?}: {}", dir, e);
            return None;
        }
    };

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| pattern.matches(name))
                .unwrap_or(false)
        })
        .map(|entry| entry.path())
        .collect();

    matches.sort();
    matches.into_iter().next()
}

/// One experiment run as found on disk.
#[derive(Debug, Clone)]
pub struct ExperimentResult {
    pub name: String,
    pub path: PathBuf,
    pub data: Option<EvaluationTable>,
    pub eval_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ExperimentResult {
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// Resolves experiments under a results root.
#[derive(Debug, Clone)]
pub struct ResultLoader {
    root: PathBuf,
}

impl ResultLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory name used by the ablation sweep for a step count.
    pub fn ablation_dir_name(steps: u32) -> String {
        format!("ablation_steps{steps}")
    }

    /// Load `<root>/ablation_steps{steps}`.
    pub fn load_ablation_step(&self, steps: u32) -> Option<ExperimentResult> {
        self.load(&Self::ablation_dir_name(steps))
    }

    /// Load `<root>/<name>`.
    ///
    /// Returns `None` when the directory does not exist. A directory without
    /// a readable evaluation CSV yields a result with `data == None`.
    pub fn load(&self, name: &str) -> Option<ExperimentResult> {
        let path = self.root.join(name);
        if !path.is_dir() {
            warn!("{} does not exist, skipping", path.display());
            return None;
        }

        let mut result = ExperimentResult {
            name: name.to_string(),
            path: path.clone(),
            data: None,
            eval_file: None,
            log_file: find_first_matching(&path, LOG_PATTERN),
        };

        match find_first_matching(&path, EVALUATION_PATTERN) {
            Some(eval_file) => {
                match EvaluationTable::from_path(&eval_file) {
                    Ok(table) => {
                        debug!(
                            "Loaded {} rows from {}",
                            table.num_rows(),
                            eval_file.display()
                        );
                        result.data = Some(table);
                    }
                    Err(e) => warn!("Could not parse {}: {}", eval_file.display(), e),
                }
                result.eval_file = Some(eval_file);
            }
            None => warn!("No evaluation file found in {}", path.display()),
        }

        Some(result)
    }
}
