//! Error types for the relay.

use render_events::EventError;
use thiserror::Error;

/// Errors that can occur while relaying render events.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The event could not be encoded for the wire
    #[error("Encoding error: {0}")]
    Encoding(#[from] EventError),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RelayError::Encoding(EventError::MissingEventType);
        assert_eq!(err.to_string(), "Encoding error: Render message has no eventType");
    }
}
