//! Command line parsing.

use super::errors::DispatchError;

/// A parsed command line: `NAME[:ARG[:ARG…]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    name: String,
    arguments: Vec<String>,
}

impl CommandLine {
    /// Parses a command line without its terminator.
    ///
    /// Surrounding whitespace is ignored and the name is lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedCommand`] when the line is not UTF-8
    /// or carries no command name.
    pub fn parse(line: &[u8]) -> Result<Self, DispatchError> {
        let text = std::str::from_utf8(line)
            .map_err(|error| DispatchError::malformed(format!("invalid UTF-8: {error}")))?;
        let mut parts = text.trim().split(':');
        let name = parts.next().unwrap_or_default().trim().to_lowercase();
        if name.is_empty() {
            return Err(DispatchError::malformed("empty command name"));
        }
        Ok(Self {
            name,
            arguments: parts.map(str::to_owned).collect(),
        })
    }

    /// Normalised command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments in order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}
