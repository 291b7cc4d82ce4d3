//! Function definition evaluation for the Glyph interpreter bridge.
//!
//! The daemon treats the interpreter as a black box behind the [`Evaluator`]
//! trait: it hands over a nested array of character rows and receives a
//! [`ResultToken`] that it renders with [`ResultToken::canonical`]. Definition
//! problems in user source are ordinary tokens carrying a [`Diagnostic`];
//! only failures of the evaluator itself surface as [`EvalError`].
//!
//! [`Workspace`] is the in-memory evaluator shipped with the daemon. It parses
//! function headers, checks names and labels, and keeps the source of every
//! defined function so it can be listed and fetched again through
//! [`FunctionCatalog`].

mod error;
mod evaluator;
mod header;
mod token;
mod workspace;

pub use error::EvalError;
pub use evaluator::{Evaluator, FunctionCatalog, Interpreter};
pub use token::{Diagnostic, ResultToken};
pub use workspace::Workspace;

#[cfg(test)]
mod tests;
