//! Error types for command dispatch.

use std::io;

use glyph_array::ArrayError;
use glyph_eval::EvalError;
use thiserror::Error;

/// Errors surfaced while reading, routing, or answering a command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command line could not be decoded or was empty.
    #[error("malformed command: {message}")]
    MalformedCommand {
        /// Description of the problem.
        message: String,
    },

    /// No handler exists for the command.
    #[error("unknown command '{command}'")]
    UnknownCommand {
        /// Command name as received.
        command: String,
    },

    /// The command's arguments were missing or invalid.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        /// Description of the problem.
        message: String,
    },

    /// A line or block exceeded the configured size limit.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Bytes read when the limit was hit.
        size: usize,
        /// Configured limit.
        max_size: usize,
    },

    /// The client closed the stream before sending the end tag.
    #[error("block ended after {lines} lines without an end tag")]
    UnterminatedBlock {
        /// Lines received before the stream closed.
        lines: usize,
    },

    /// Reading from or writing to the client failed.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),

    /// A materialized value failed its structural check.
    #[error("malformed value: {0}")]
    Structure(#[from] ArrayError),

    /// The evaluator failed internally.
    #[error("evaluator failure: {0}")]
    Evaluator(#[from] EvalError),
}

impl DispatchError {
    /// Returns true when the connection must be closed.
    ///
    /// After these errors the stream position or the server state can no
    /// longer be trusted. Other errors are answered in-band.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::RequestTooLarge { .. }
                | Self::UnterminatedBlock { .. }
                | Self::Io(_)
                | Self::Structure(_)
                | Self::Evaluator(_)
        )
    }

    /// Creates a malformed command error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedCommand {
            message: message.into(),
        }
    }

    /// Creates an unknown command error.
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates an invalid arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Creates a request too large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }

    /// Creates an unterminated block error.
    #[must_use]
    pub const fn unterminated_block(lines: usize) -> Self {
        Self::UnterminatedBlock { lines }
    }
}
