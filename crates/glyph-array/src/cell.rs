//! Ravel cells.

use crate::value::Value;

/// A single element of a value's ravel.
///
/// Pointer cells own their nested value outright. A nested value is never
/// shared between two containers, so dropping the outer value releases every
/// row it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// A character scalar.
    Char(char),
    /// An integer scalar.
    Int(i64),
    /// A nested value owned by this cell.
    Pointer(Box<Value>),
}

impl Cell {
    /// Wraps a nested value in a pointer cell.
    #[must_use]
    pub fn pointer(value: Value) -> Self {
        Self::Pointer(Box::new(value))
    }

    /// Returns the character held by a character cell.
    #[must_use]
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(ch) => Some(*ch),
            Self::Int(_) | Self::Pointer(_) => None,
        }
    }

    /// Returns the nested value held by a pointer cell.
    #[must_use]
    pub fn as_nested(&self) -> Option<&Value> {
        match self {
            Self::Pointer(value) => Some(value),
            Self::Char(_) | Self::Int(_) => None,
        }
    }

    /// Returns true for character cells.
    #[must_use]
    pub const fn is_char(&self) -> bool {
        matches!(self, Self::Char(_))
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self {
        Self::Char(ch)
    }
}

impl From<i64> for Cell {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Self::pointer(value)
    }
}
