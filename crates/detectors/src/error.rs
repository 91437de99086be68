//! Error types for detector attachment.

use thiserror::Error;

/// Reasons an observation primitive refused to attach.
///
/// Attachment failure is fatal to the affected detector only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    /// The host does not provide the primitive at all
    #[error("{primitive} is not supported by this host")]
    Unsupported { primitive: &'static str },

    /// The host rejected the requested options
    #[error("Invalid observation options: {0}")]
    InvalidOptions(String),

    /// The host refused for some other reason
    #[error("Observation rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AttachError::Unsupported {
            primitive: "PerformanceObserver",
        };
        assert_eq!(err.to_string(), "PerformanceObserver is not supported by this host");

        let err = AttachError::InvalidOptions("no change types selected".to_string());
        assert_eq!(err.to_string(), "Invalid observation options: no change types selected");
    }
}
