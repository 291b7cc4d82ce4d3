//! Error types for array construction and validation.

use thiserror::Error;

/// Errors raised while building or validating array values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// A value's populated ravel does not match its declared shape.
    ///
    /// Values built by this crate never trip this check; seeing it means a
    /// caller filled a value incorrectly.
    #[error(
        "structural invariant violated at depth {depth}: shape declares {expected} cells, \
         ravel holds {actual}"
    )]
    StructuralInvariantViolation {
        /// Nesting depth of the offending value (0 for the outermost value).
        depth: usize,
        /// Cell count implied by the declared shape.
        expected: usize,
        /// Cell count actually present in the ravel.
        actual: usize,
    },

    /// A cell was pushed into a value whose ravel is already full.
    #[error("ravel overflow: value holds at most {capacity} cells")]
    RavelOverflow {
        /// Cell count implied by the declared shape.
        capacity: usize,
    },
}

impl ArrayError {
    /// Creates a new `StructuralInvariantViolation` error.
    #[must_use]
    pub const fn structural(depth: usize, expected: usize, actual: usize) -> Self {
        Self::StructuralInvariantViolation {
            depth,
            expected,
            actual,
        }
    }

    /// Creates a new `RavelOverflow` error.
    #[must_use]
    pub const fn ravel_overflow(capacity: usize) -> Self {
        Self::RavelOverflow { capacity }
    }
}
