//! Common result and error types for the placer.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an internal invariant violation (a bug in the placer), not
/// a problem with the user's board. Board problems are reported through the
/// diagnostic sink and surface as a failed run.
pub type PlaceResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in the placer, not a user input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal placer error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
