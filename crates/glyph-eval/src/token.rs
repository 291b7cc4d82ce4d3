//! Result tokens produced by the evaluator.

use glyph_array::Value;
use strum::Display;

/// Interpreter error classes reported back to clients as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Diagnostic {
    /// The function header could not be parsed.
    #[strum(to_string = "SYNTAX ERROR")]
    SyntaxError,
    /// The definition is structurally unacceptable (empty, duplicate names).
    #[strum(to_string = "DEFN ERROR")]
    DefnError,
    /// The argument holds something other than characters.
    #[strum(to_string = "DOMAIN ERROR")]
    DomainError,
    /// The argument is neither a vector nor a matrix.
    #[strum(to_string = "RANK ERROR")]
    RankError,
    /// The requested name is not defined.
    #[strum(to_string = "VALUE ERROR")]
    ValueError,
}

/// Outcome of an evaluator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultToken {
    /// A function was defined under the given name.
    Defined {
        /// Name the function was registered under.
        name: String,
    },
    /// The request was understood but rejected by the interpreter.
    Diagnostic(Diagnostic),
    /// A plain value result.
    Value(Value),
}

impl ResultToken {
    /// Creates a `Defined` token.
    #[must_use]
    pub fn defined(name: impl Into<String>) -> Self {
        Self::Defined { name: name.into() }
    }

    /// Returns true when the token reports a diagnostic.
    #[must_use]
    pub const fn is_diagnostic(&self) -> bool {
        matches!(self, Self::Diagnostic(_))
    }

    /// Renders the token as a single line of text without a terminator.
    ///
    /// Line breaks inside value content are folded into spaces so the
    /// rendering never spans more than one line.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Defined { name } => name.clone(),
            Self::Diagnostic(diagnostic) => diagnostic.to_string(),
            Self::Value(value) => value
                .to_string()
                .chars()
                .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
                .collect(),
        }
    }
}

impl From<Diagnostic> for ResultToken {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::Diagnostic(diagnostic)
    }
}
