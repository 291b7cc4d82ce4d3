//! Response reading for the daemon line protocol.

use std::io::BufRead;

use crate::errors::AppError;

/// A response body read up to the end tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Response {
    body: String,
}

impl Response {
    /// Reads lines until one equals `end_tag`.
    pub(crate) fn read_from<R: BufRead>(reader: &mut R, end_tag: &str) -> Result<Self, AppError> {
        let mut lines: Vec<String> = Vec::new();
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).map_err(AppError::ReadResponse)? == 0 {
                return Err(AppError::MissingEndTag);
            }
            let text = line.trim_end_matches(['\r', '\n']);
            if text == end_tag {
                break;
            }
            lines.push(text.to_owned());
        }
        Ok(Self {
            body: lines.join("\n"),
        })
    }

    pub(crate) fn body(&self) -> &str {
        &self.body
    }

    /// Protocol errors and interpreter diagnostics count as failures.
    ///
    /// Diagnostics are always a single line, so multi-line bodies such as
    /// function sources are never classified by their last line.
    pub(crate) fn is_failure(&self) -> bool {
        let single_line = !self.body.contains('\n');
        self.body.starts_with("error:") || (single_line && self.body.ends_with(" ERROR"))
    }
}
