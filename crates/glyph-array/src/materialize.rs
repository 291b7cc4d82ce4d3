//! Conversion of a received text block into a nested array value.

use crate::cell::Cell;
use crate::error::ArrayError;
use crate::shape::Shape;
use crate::value::Value;

/// Converts a block of text lines into a vector of character vectors.
///
/// The outer vector holds exactly one pointer cell per input line, in input
/// order. Each line is decoded as UTF-8 (invalid sequences become U+FFFD) and
/// becomes a character vector whose length is its decoded character count,
/// so empty lines yield empty rows and an empty block yields an empty vector.
///
/// # Errors
///
/// Returns [`ArrayError::StructuralInvariantViolation`] if the finished value
/// fails its structural check. Construction here fills every slot, so the
/// error signals a defect rather than bad input.
pub fn materialize<L>(lines: &[L]) -> Result<Value, ArrayError>
where
    L: AsRef<[u8]>,
{
    let mut block = Value::with_shape(Shape::vector(lines.len()));
    for line in lines {
        let row = character_row(&String::from_utf8_lossy(line.as_ref()))?;
        block.push_cell(Cell::pointer(row))?;
    }
    block.check()?;
    Ok(block)
}

fn character_row(text: &str) -> Result<Value, ArrayError> {
    let mut row = Value::with_shape(Shape::vector(text.chars().count()));
    for ch in text.chars() {
        row.push_cell(Cell::Char(ch))?;
    }
    Ok(row)
}
