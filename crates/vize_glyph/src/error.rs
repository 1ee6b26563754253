//! Error types for vize_glyph formatter.

use thiserror::Error;

/// Errors that can occur during formatting
#[derive(Debug, Error)]
pub enum FormatError {
    /// Error parsing JavaScript/TypeScript
    #[error("Failed to parse script: {0}")]
    ScriptParseError(String),

    /// Error parsing a standalone expression
    #[error("Failed to parse expression: {0}")]
    ExpressionParseError(String),

    /// Codegen output did not have the expected shape
    #[error("Failed to format script: {0}")]
    ScriptFormatError(String),
}
