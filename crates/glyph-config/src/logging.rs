//! Log output formats.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the daemon renders its log lines.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Compact human-readable lines.
    Compact,
}

/// Error returned when text names no [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("COMPACT".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert_eq!(LogFormat::Json.to_string(), "json");
    }
}
