//! Per-connection protocol session.
//!
//! A session wraps a connected stream and exposes the two halves of the line
//! protocol: reading command lines and end-tag terminated blocks
//! ([`BlockSource`]) and writing raw response bytes ([`ResponseSink`]).

use std::io::{self, BufRead, BufReader, Read, Write};

use glyph_config::Config;

use crate::dispatch::{CommandLine, DispatchError};

/// Supplies the lines of one request block.
pub trait BlockSource {
    /// Reads lines up to (not including) the end-tag line.
    ///
    /// Line terminators are removed. The block may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnterminatedBlock`] when the client closes the
    /// stream before the end tag, [`DispatchError::RequestTooLarge`] when the
    /// block exceeds the configured limit, or [`DispatchError::Io`] on read
    /// failure.
    fn load_block(&mut self) -> Result<Vec<Vec<u8>>, DispatchError>;
}

/// Accepts response bytes.
pub trait ResponseSink {
    /// Writes all of `data` to the client.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()>;
}

impl<T> ResponseSink for &mut T
where
    T: ResponseSink + ?Sized,
{
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        (**self).write_bytes(data)
    }
}

impl ResponseSink for Vec<u8> {
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }
}

/// Framing parameters shared by every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    end_tag: String,
    max_block_bytes: usize,
}

impl Protocol {
    /// Creates protocol parameters.
    #[must_use]
    pub fn new(end_tag: impl Into<String>, max_block_bytes: usize) -> Self {
        Self {
            end_tag: end_tag.into(),
            max_block_bytes,
        }
    }

    /// Builds protocol parameters from the daemon configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.end_tag(), config.max_block_bytes())
    }

    /// Marker line closing blocks and responses.
    #[must_use]
    pub fn end_tag(&self) -> &str {
        &self.end_tag
    }

    /// Maximum accepted block size in bytes.
    #[must_use]
    pub const fn max_block_bytes(&self) -> usize {
        self.max_block_bytes
    }
}

/// Line protocol session over a bidirectional stream.
pub struct Session<S> {
    reader: BufReader<S>,
    protocol: Protocol,
}

impl<S> Session<S>
where
    S: Read + Write,
{
    /// Wraps a connected stream.
    pub fn new(stream: S, protocol: Protocol) -> Self {
        Self {
            reader: BufReader::new(stream),
            protocol,
        }
    }

    /// Framing parameters of this session.
    pub const fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Returns the underlying stream, discarding buffered input.
    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }

    /// Reads the next non-blank command line.
    ///
    /// Returns `Ok(None)` once the client closes the stream.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedCommand`] for undecodable lines,
    /// [`DispatchError::RequestTooLarge`] for overlong lines, and
    /// [`DispatchError::Io`] on read failure.
    pub fn next_command(&mut self) -> Result<Option<CommandLine>, DispatchError> {
        loop {
            let Some(line) = self.read_line(0)? else {
                return Ok(None);
            };
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            return CommandLine::parse(&line).map(Some);
        }
    }

    /// Reads one line without its terminator, or `None` at end of stream.
    ///
    /// `consumed` counts block bytes already read so the size limit covers
    /// the whole block.
    fn read_line(&mut self, consumed: usize) -> Result<Option<Vec<u8>>, DispatchError> {
        let max = self.protocol.max_block_bytes;
        let budget = max.saturating_sub(consumed);
        let mut line = Vec::new();
        let limit = u64::try_from(budget.saturating_add(1)).unwrap_or(u64::MAX);
        let read = (&mut self.reader).take(limit).read_until(b'\n', &mut line)?;
        if read == 0 {
            return Ok(None);
        }
        if read > budget {
            return Err(DispatchError::request_too_large(consumed.saturating_add(read), max));
        }
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

impl<S> BlockSource for Session<S>
where
    S: Read + Write,
{
    fn load_block(&mut self) -> Result<Vec<Vec<u8>>, DispatchError> {
        let mut lines = Vec::new();
        let mut consumed = 0_usize;
        loop {
            let Some(line) = self.read_line(consumed)? else {
                return Err(DispatchError::unterminated_block(lines.len()));
            };
            if line == self.protocol.end_tag.as_bytes() {
                return Ok(lines);
            }
            // Account for the stripped terminator as well.
            consumed = consumed.saturating_add(line.len() + 1);
            lines.push(line);
        }
    }
}

impl<S> ResponseSink for Session<S>
where
    S: Read + Write,
{
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        let stream = self.reader.get_mut();
        stream.write_all(data)?;
        stream.flush()
    }
}
