//! Error types for vize_musea.

use thiserror::Error;

/// Errors on the host side of the preview protocol.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A message could not be encoded or decoded
    #[error("Invalid preview message: {0}")]
    InvalidMessage(#[from] serde_json::Error),

    /// The controller task has shut down
    #[error("Preview controller is closed")]
    ControllerClosed,

    /// The iframe host failed to deliver a message
    #[error("Failed to post message to preview iframe: {0}")]
    Transport(String),
}

/// Errors raised by a script engine while evaluating preview sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The source does not parse
    #[error("SyntaxError: {0}")]
    Syntax(String),

    /// Evaluation threw
    #[error("{0}")]
    Thrown(String),
}

/// Errors inside the iframe runtime. All of them are reported to the host
/// as `rendering-error` events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The previewable module or wrapper failed to load
    #[error("{0}")]
    Load(String),

    /// Evaluating default props or the invocation failed
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// The framework renderer threw
    #[error("{0}")]
    Render(String),
}
