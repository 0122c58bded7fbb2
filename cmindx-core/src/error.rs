//! Error types for cmindx-core

use thiserror::Error;

/// A submitted event was rejected before reaching the sink
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Malformed event: {0}")]
    Malformed(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl EventError {
    /// Stable machine-readable code used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "MALFORMED",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
        }
    }
}
