//! Evaluator seams consumed by the daemon.

use std::sync::Arc;

use glyph_array::Value;

use crate::error::EvalError;
use crate::token::ResultToken;

/// Compiles function definitions from arrays of character rows.
pub trait Evaluator: Send + Sync {
    /// Defines a function from a vector of character rows (or a character
    /// matrix), header first.
    ///
    /// Always yields a token when the evaluator is healthy; user mistakes are
    /// diagnostic tokens.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError`] only for internal evaluator faults.
    fn define_from_rows(&self, value: Value) -> Result<ResultToken, EvalError>;
}

/// Read access to the functions an evaluator has defined.
pub trait FunctionCatalog: Send + Sync {
    /// Names of all defined functions in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError`] for internal evaluator faults.
    fn function_names(&self) -> Result<Vec<String>, EvalError>;

    /// Source of the named function as a vector of character rows.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError`] for internal evaluator faults.
    fn function_source(&self, name: &str) -> Result<Option<Value>, EvalError>;
}

/// Everything the daemon needs from an interpreter.
pub trait Interpreter: Evaluator + FunctionCatalog {}

impl<T> Interpreter for T where T: Evaluator + FunctionCatalog {}

impl<T> Evaluator for Arc<T>
where
    T: Evaluator + ?Sized,
{
    fn define_from_rows(&self, value: Value) -> Result<ResultToken, EvalError> {
        (**self).define_from_rows(value)
    }
}

impl<T> FunctionCatalog for Arc<T>
where
    T: FunctionCatalog + ?Sized,
{
    fn function_names(&self) -> Result<Vec<String>, EvalError> {
        (**self).function_names()
    }

    fn function_source(&self, name: &str) -> Result<Option<Value>, EvalError> {
        (**self).function_source(name)
    }
}
