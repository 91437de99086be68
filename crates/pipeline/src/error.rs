//! Error types for the pipeline crate.

use thiserror::Error;

/// Errors raised while configuring or replaying a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading or writing a file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A trace line is not a valid step
    #[error("Invalid trace step on line {line}: {source}")]
    Trace {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PipelineError::Trace { line: 3, source };
        assert!(err.to_string().starts_with("Invalid trace step on line 3:"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PipelineError = io.into();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
