//! Error types for the dice todo engine.

use thiserror::Error;

/// Result type for engine operations.
pub type DtResult<T> = Result<T, DtError>;

/// Errors surfaced to callers of the engine.
///
/// Task-store misses (empty text, unknown ids) are silent no-ops and never
/// show up here; these variants cover malformed input at the edges.
#[derive(Debug, Error)]
pub enum DtError {
    /// A die face outside 1-6.
    #[error("invalid die face: {0} (expected 1-6)")]
    InvalidDieFace(u32),

    /// A theme identifier outside 1-6.
    #[error("invalid theme: {0} (expected 1-6)")]
    InvalidTheme(u32),

    /// A task reference (position or id prefix) that matched nothing.
    #[error("no task matches '{0}'")]
    UnknownTask(String),

    /// A task reference that matched more than one task.
    #[error("ambiguous task reference '{0}'")]
    AmbiguousTask(String),

    /// Invalid command arguments.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Unsupported export format.
    #[error("unknown format '{0}', use: markdown, text, json")]
    UnknownFormat(String),

    /// JSON export failed.
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
}
