//! Error types for the engine crate.
//!
//! The reducer itself is total and never fails; errors only come out of
//! the interactive session layer when host input cannot be mapped to an
//! action.

use thiserror::Error;

/// Result type for session operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the session command layer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The command text matched nothing the session understands.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command argument was missing or invalid.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),
}
