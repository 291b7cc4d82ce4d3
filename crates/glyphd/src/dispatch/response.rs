//! Response framing for the line protocol.

use crate::session::ResponseSink;

use super::errors::DispatchError;

/// Frames response bodies with the end tag.
///
/// Every response is written as two sink writes: the body, then a newline,
/// the end tag, and a newline. Clients read until the end-tag line.
pub struct ResponseWriter<'tag, W> {
    sink: W,
    end_tag: &'tag str,
}

impl<'tag, W: ResponseSink> ResponseWriter<'tag, W> {
    /// Creates a writer over `sink` closing responses with `end_tag`.
    pub const fn new(sink: W, end_tag: &'tag str) -> Self {
        Self { sink, end_tag }
    }

    /// Writes `body` followed by the end marker.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Io`] when either write fails. Nothing is
    /// retried.
    pub fn respond(&mut self, body: &str) -> Result<(), DispatchError> {
        self.sink.write_bytes(body.as_bytes())?;
        self.sink.write_bytes(self.marker().as_bytes())?;
        Ok(())
    }

    /// Writes an in-band `error:` response for a non-fatal error.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Io`] when writing fails.
    pub fn respond_error(&mut self, error: &DispatchError) -> Result<(), DispatchError> {
        self.respond(&format!("error: {error}"))
    }

    fn marker(&self) -> String {
        format!("\n{}\n", self.end_tag)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::tests::support::BrokenSink;

    /// Records each write separately.
    #[derive(Default)]
    struct ChunkSink(Vec<Vec<u8>>);

    impl ResponseSink for ChunkSink {
        fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
            self.0.push(data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn respond_issues_body_then_marker() {
        let mut sink = ChunkSink::default();
        ResponseWriter::new(&mut sink, "END")
            .respond("PLUS")
            .expect("respond");
        assert_eq!(sink.0, vec![b"PLUS".to_vec(), b"\nEND\n".to_vec()]);
    }

    #[test]
    fn empty_body_still_gets_marker() {
        let mut output = Vec::new();
        ResponseWriter::new(&mut output, "END")
            .respond("")
            .expect("respond");
        assert_eq!(output, b"\nEND\n");
    }

    #[test]
    fn error_responses_are_prefixed() {
        let mut output = Vec::new();
        let error = DispatchError::unknown_command("bogus");
        ResponseWriter::new(&mut output, "END")
            .respond_error(&error)
            .expect("respond");
        assert_eq!(
            String::from_utf8(output).expect("utf8"),
            "error: unknown command 'bogus'\nEND\n"
        );
    }

    #[test]
    fn write_failures_propagate() {
        let error = ResponseWriter::new(BrokenSink, "END")
            .respond("x")
            .expect_err("broken sink");
        assert!(matches!(error, DispatchError::Io(ref io) if io.kind() == io::ErrorKind::BrokenPipe));
    }
}
