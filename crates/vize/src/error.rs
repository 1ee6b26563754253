//! CLI error type.

use std::path::PathBuf;
use thiserror::Error;
use vize_esquisse::GenerateError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Analysis(#[from] GenerateError),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}
