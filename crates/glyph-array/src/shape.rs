//! Array shapes.

use std::fmt;

/// Axis lengths of an array value.
///
/// A shape with no axes describes a scalar. The number of cells a value holds
/// is the product of its axis lengths, so any zero-length axis yields an empty
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Creates a shape from explicit axis lengths.
    #[must_use]
    pub const fn new(axes: Vec<usize>) -> Self {
        Self(axes)
    }

    /// Shape of a scalar.
    #[must_use]
    pub const fn scalar() -> Self {
        Self(Vec::new())
    }

    /// Shape of a vector holding `len` cells.
    #[must_use]
    pub fn vector(len: usize) -> Self {
        Self(vec![len])
    }

    /// Shape of a matrix with `rows` rows and `cols` columns.
    #[must_use]
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self(vec![rows, cols])
    }

    /// Number of axes.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.0.len()
    }

    /// Number of cells described by this shape.
    ///
    /// Saturates at `usize::MAX` when the axis product does not fit.
    #[must_use]
    pub fn volume(&self) -> usize {
        self.0
            .iter()
            .try_fold(1_usize, |acc, &axis| acc.checked_mul(axis))
            .unwrap_or(usize::MAX)
    }

    /// Length of the given axis, if present.
    #[must_use]
    pub fn axis(&self, index: usize) -> Option<usize> {
        self.0.get(index).copied()
    }

    /// Axis lengths in order.
    #[must_use]
    pub fn axes(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for axis in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{axis}")?;
            first = false;
        }
        Ok(())
    }
}
