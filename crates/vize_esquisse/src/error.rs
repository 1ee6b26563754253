//! Error types for vize_esquisse.

use thiserror::Error;

/// Errors that can occur while reading generator input.
///
/// Generation itself never fails; only decoding the resolver's output can.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The component analysis JSON could not be decoded
    #[error("Failed to decode component analysis: {0}")]
    InvalidAnalysis(#[from] serde_json::Error),

    /// The analysis named a props type that is not in its dictionary
    #[error("Props type `{0}` is not in the collected types")]
    UnknownPropsType(String),
}
