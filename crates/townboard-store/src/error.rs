//! Store error types.

use thiserror::Error;
use townboard_core::FieldError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the event store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No event with the given id; on public paths, also raised for
    /// inactive events.
    #[error("no event with id {id}")]
    NotFound { id: i64 },

    /// Reactivation refused: the event has already taken place.
    #[error("event {id} has already taken place and cannot be reactivated")]
    PastEvent { id: i64 },

    /// The submitted fields failed validation.
    #[error("validation failed: {}", summarize(.0))]
    Rejected(Vec<FieldError>),
}

impl StoreError {
    /// Creates a not-found error.
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Creates a past-event refusal.
    pub fn past_event(id: i64) -> Self {
        Self::PastEvent { id }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
