//! Error types for render event encoding.

use thiserror::Error;

/// Errors that can occur while encoding or decoding render messages.
#[derive(Debug, Error)]
pub enum EventError {
    /// Failed to serialize or deserialize a message
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A render message arrived without an `eventType`
    #[error("Render message has no eventType")]
    MissingEventType,
}

/// Result type for render event operations.
pub type EventResult<T> = Result<T, EventError>;
