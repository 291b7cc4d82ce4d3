//! Function header parsing.
//!
//! A header line has the shape `[Z←] [A] NAME [B] [;L1;L2…]`: an optional
//! result name, then one to three whitespace-separated names (niladic,
//! monadic, or dyadic), then optional semicolon-separated local names.

use std::collections::BTreeSet;

use crate::token::Diagnostic;

/// Parsed function header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Header {
    pub(crate) name: String,
    pub(crate) result: Option<String>,
    pub(crate) left: Option<String>,
    pub(crate) right: Option<String>,
    pub(crate) locals: Vec<String>,
}

impl Header {
    /// Parses a header line, ignoring a leading `∇`.
    pub(crate) fn parse(line: &str) -> Result<Self, Diagnostic> {
        let line = line.trim();
        let line = line.strip_prefix('∇').unwrap_or(line);

        let mut sections = line.split(';');
        let signature = sections.next().unwrap_or_default();
        let locals = sections
            .map(|local| identifier(local.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        let (result, call) = match signature.split_once('←') {
            Some((result, call)) => (Some(identifier(result.trim())?), call),
            None => (None, signature),
        };

        let words = call
            .split_whitespace()
            .map(identifier)
            .collect::<Result<Vec<_>, _>>()?;
        let (left, name, right) = match <[String; 3]>::try_from(words) {
            Ok([left, name, right]) => (Some(left), name, Some(right)),
            Err(words) => match words.as_slice() {
                [name] => (None, name.clone(), None),
                [name, right] => (None, name.clone(), Some(right.clone())),
                _ => return Err(Diagnostic::SyntaxError),
            },
        };

        let header = Self {
            name,
            result,
            left,
            right,
            locals,
        };
        header.ensure_distinct_names()?;
        Ok(header)
    }

    /// All names the header binds, function name first.
    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.result.as_deref())
            .chain(self.left.as_deref())
            .chain(self.right.as_deref())
            .chain(self.locals.iter().map(String::as_str))
    }

    fn ensure_distinct_names(&self) -> Result<(), Diagnostic> {
        let mut seen = BTreeSet::new();
        if self.names().all(|name| seen.insert(name)) {
            Ok(())
        } else {
            Err(Diagnostic::DefnError)
        }
    }
}

/// Validates an APL identifier and returns it owned.
pub(crate) fn identifier(word: &str) -> Result<String, Diagnostic> {
    if is_identifier(word) {
        Ok(word.to_owned())
    } else {
        Err(Diagnostic::SyntaxError)
    }
}

pub(crate) fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_name_start(first) && chars.all(|ch| is_name_start(ch) || ch.is_alphanumeric() || ch == '¯')
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || matches!(ch, '∆' | '⍙' | '_')
}
