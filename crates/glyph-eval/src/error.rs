//! Error types for evaluator failures.

use thiserror::Error;

/// Failures of the evaluator itself.
///
/// Mistakes in submitted function source are not errors; they are reported
/// as diagnostic [`ResultToken`](crate::ResultToken)s.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The shared function table lock was poisoned by a panicking thread.
    #[error("workspace lock poisoned")]
    LockPoisoned,

    /// Any other internal evaluator fault.
    #[error("evaluator failure: {message}")]
    Internal {
        /// Description of the fault.
        message: String,
    },
}

impl EvalError {
    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
