//! Error types for event sinks.

use thiserror::Error;

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;

/// Errors that can occur while recording or listing events.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Database error from libSQL.
    #[error("database error: {0}")]
    Database(#[from] libsql::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row could not be turned back into an event.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
