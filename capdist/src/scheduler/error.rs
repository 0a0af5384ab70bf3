//! Computation errors.

use thiserror::Error;

/// Errors that abort a whole computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputeError {
    /// A code could not be resolved while a batch was running
    #[error("Location '{code}' could not be resolved during computation")]
    MissingPoint { code: String },

    /// The caller went away or cancelled the session
    #[error("Computation cancelled")]
    Cancelled,

    /// A batch worker panicked or was aborted
    #[error("Batch worker failed: {0}")]
    Worker(String),
}

impl ComputeError {
    /// Whether this error is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_missing_point() {
        let err = ComputeError::MissingPoint {
            code: "ZZ".to_string(),
        };
        assert!(err.to_string().contains("'ZZ'"));
    }

    #[test]
    fn test_is_cancelled() {
        assert!(ComputeError::Cancelled.is_cancelled());
        assert!(!ComputeError::Worker("boom".to_string()).is_cancelled());
    }
}
