use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DockstatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Results directory {} does not exist", .0.display())]
    ResultsDirMissing(PathBuf),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<toml::de::Error> for DockstatError {
    fn from(e: toml::de::Error) -> Self {
        DockstatError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DockstatError>;
