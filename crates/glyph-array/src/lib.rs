//! Nested array values for the Glyph interpreter bridge.
//!
//! This crate models the interpreter's native value representation: a value
//! is a [`Shape`] plus a flat ravel of [`Cell`]s. Cells are either scalar
//! characters, scalar integers, or owned pointers to nested values, which is
//! how a vector of character vectors (one per source line) is represented.
//!
//! Values are built the same way the interpreter builds them: allocate a value
//! for a declared shape, fill its ravel slot by slot, then run
//! [`Value::check`] to confirm that every nesting level is fully populated.
//!
//! # Block materialization
//!
//! [`materialize`] converts a block of raw text lines received from a client
//! into a nested vector of character rows, ready to hand to an evaluator:
//!
//! ```
//! use glyph_array::{materialize, Cell};
//!
//! let block = materialize(&["Z←X+Y", ""]).expect("well-formed block");
//! assert_eq!(block.element_count(), 2);
//! let rows = block.rows().expect("character rows");
//! assert_eq!(rows, vec!["Z←X+Y".to_owned(), String::new()]);
//! assert!(matches!(block.cell(0), Some(Cell::Pointer(_))));
//! ```

mod cell;
mod error;
mod materialize;
mod shape;
mod value;

pub use cell::Cell;
pub use error::ArrayError;
pub use materialize::materialize;
pub use shape::Shape;
pub use value::Value;

#[cfg(test)]
mod tests;
