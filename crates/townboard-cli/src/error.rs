//! CLI error types.

use thiserror::Error;
use townboard_store::StoreError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Store failure, passed through with its own message.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A date argument did not parse.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A time argument did not parse.
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    /// Deletion attempted without the confirmation flag.
    #[error("refusing to delete without --yes (deletion is permanent)")]
    ConfirmationRequired,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
