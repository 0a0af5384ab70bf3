//! Service error types.

use crate::request::InputError;
use crate::scheduler::ComputeError;
use crate::stream::ErrorPayload;
use thiserror::Error;

/// Errors returned by the synchronous request path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Rejected before any computation started
    #[error(transparent)]
    Input(#[from] InputError),

    /// The computation was aborted
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

impl ServiceError {
    /// The `{error: string}` wire body for this error.
    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload::new(self.to_string())
    }

    /// Whether the caller could fix this by changing the request.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}
