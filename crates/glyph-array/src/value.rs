//! Array values: a shape and its ravel.

use std::fmt;

use crate::cell::Cell;
use crate::error::ArrayError;
use crate::shape::Shape;

/// An array value.
///
/// A value is created for a fixed [`Shape`] and filled cell by cell with
/// [`Value::push_cell`]. Until every slot has been filled the value is
/// incomplete; [`Value::check`] reports incomplete values at any nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    shape: Shape,
    ravel: Vec<Cell>,
}

/// Upper bound on the ravel slots reserved up front.
const PREALLOCATED_CELLS: usize = 1 << 16;

impl Value {
    /// Allocates an empty ravel for the given shape.
    #[must_use]
    pub fn with_shape(shape: Shape) -> Self {
        // Larger shapes grow on push.
        let ravel = Vec::with_capacity(shape.volume().min(PREALLOCATED_CELLS));
        Self { shape, ravel }
    }

    /// Builds a character vector from text, one cell per character.
    #[must_use]
    pub fn char_vector(text: &str) -> Self {
        let ravel: Vec<Cell> = text.chars().map(Cell::Char).collect();
        Self {
            shape: Shape::vector(ravel.len()),
            ravel,
        }
    }

    /// Builds a vector whose cells point at the given values.
    #[must_use]
    pub fn nested_vector(items: Vec<Self>) -> Self {
        let ravel: Vec<Cell> = items.into_iter().map(Cell::pointer).collect();
        Self {
            shape: Shape::vector(ravel.len()),
            ravel,
        }
    }

    /// Builds an integer scalar.
    #[must_use]
    pub fn int_scalar(number: i64) -> Self {
        Self {
            shape: Shape::scalar(),
            ravel: vec![Cell::Int(number)],
        }
    }

    /// Fills the next free ravel slot.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::RavelOverflow`] when every slot implied by the
    /// shape is already populated.
    pub fn push_cell(&mut self, cell: Cell) -> Result<(), ArrayError> {
        let capacity = self.shape.volume();
        if self.ravel.len() >= capacity {
            return Err(ArrayError::ravel_overflow(capacity));
        }
        self.ravel.push(cell);
        Ok(())
    }

    /// Verifies that the ravel matches the shape at every nesting level.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::StructuralInvariantViolation`] for the first
    /// value (outermost first, then in ravel order) whose populated cell count
    /// differs from its declared volume.
    pub fn check(&self) -> Result<(), ArrayError> {
        self.check_at(0)
    }

    fn check_at(&self, depth: usize) -> Result<(), ArrayError> {
        let expected = self.shape.volume();
        let actual = self.ravel.len();
        if expected != actual {
            return Err(ArrayError::structural(depth, expected, actual));
        }
        self.ravel
            .iter()
            .filter_map(Cell::as_nested)
            .try_for_each(|nested| nested.check_at(depth + 1))
    }

    /// Declared shape.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of axes.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Number of populated cells.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.ravel.len()
    }

    /// Populated cells in ravel order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.ravel
    }

    /// Cell at the given ravel position.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.ravel.get(index)
    }

    /// Returns the text of a character scalar or character vector.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        if self.rank() > 1 {
            return None;
        }
        self.ravel.iter().map(Cell::as_char).collect()
    }

    /// Returns the rows of a vector of character vectors or a character matrix.
    ///
    /// Character scalars inside a vector count as one-character rows. Any other
    /// content yields `None`.
    #[must_use]
    pub fn rows(&self) -> Option<Vec<String>> {
        match self.rank() {
            1 => self.ravel.iter().map(row_text).collect(),
            2 => self.matrix_rows(),
            _ => None,
        }
    }

    fn matrix_rows(&self) -> Option<Vec<String>> {
        let rows = self.shape.axis(0)?;
        let cols = self.shape.axis(1)?;
        if cols == 0 {
            return Some(vec![String::new(); rows]);
        }
        self.ravel
            .chunks(cols)
            .map(|row| row.iter().map(Cell::as_char).collect())
            .collect()
    }
}

fn row_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Char(ch) => Some(ch.to_string()),
        Cell::Pointer(nested) => nested.as_text(),
        Cell::Int(_) => None,
    }
}

impl fmt::Display for Value {
    /// Renders the value on a single line.
    ///
    /// Character content is written verbatim. Other cells are separated by a
    /// single space, and negative integers use the APL high minus.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.as_text() {
            return f.write_str(&text);
        }
        let mut first = true;
        for cell in &self.ravel {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match cell {
                Cell::Char(ch) => write!(f, "{ch}")?,
                Cell::Int(number) if *number < 0 => write!(f, "¯{}", number.unsigned_abs())?,
                Cell::Int(number) => write!(f, "{number}")?,
                Cell::Pointer(nested) => write!(f, "{nested}")?,
            }
        }
        Ok(())
    }
}
