//! Request framing for the daemon line protocol.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::cli::CliCommand;
use crate::errors::AppError;

/// A request ready to be written to the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Request {
    Define { lines: Vec<String> },
    Function { name: String },
    FunctionList,
}

impl Request {
    /// Builds the request for `command`, reading source files as needed.
    pub(crate) fn from_command(command: CliCommand, end_tag: &str) -> Result<Self, AppError> {
        match command {
            CliCommand::Def { file } => read_definition(&file, end_tag),
            CliCommand::Fn { name } => Ok(Self::Function { name }),
            CliCommand::Fnlist => Ok(Self::FunctionList),
        }
    }

    /// Writes the command line and, for definitions, the block and end tag.
    pub(crate) fn write_to<W: Write>(&self, writer: &mut W, end_tag: &str) -> Result<(), AppError> {
        let mut frame = String::new();
        match self {
            Self::Define { lines } => {
                frame.push_str("def\n");
                for line in lines {
                    frame.push_str(line);
                    frame.push('\n');
                }
                frame.push_str(end_tag);
                frame.push('\n');
            }
            Self::Function { name } => {
                frame.push_str("fn:");
                frame.push_str(name);
                frame.push('\n');
            }
            Self::FunctionList => frame.push_str("fnlist\n"),
        }
        writer
            .write_all(frame.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(AppError::SendRequest)
    }
}

fn read_definition(path: &Path, end_tag: &str) -> Result<Request, AppError> {
    let bytes = fs::read(path).map_err(|source| AppError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<String> = text.lines().map(str::to_owned).collect();
    if let Some(position) = lines.iter().position(|line| line == end_tag) {
        return Err(AppError::EndTagInSource {
            path: path.to_path_buf(),
            line: position + 1,
        });
    }
    Ok(Request::Define { lines })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;

    use super::*;

    fn framed(request: &Request) -> String {
        let mut output = Vec::new();
        request.write_to(&mut output, "END").expect("write request");
        String::from_utf8(output).expect("utf8")
    }

    #[rstest]
    #[case(Request::FunctionList, "fnlist\n")]
    #[case(Request::Function { name: "PLUS".to_owned() }, "fn:PLUS\n")]
    #[case(
        Request::Define { lines: vec!["Z←X PLUS Y".to_owned(), String::new(), "Z←X+Y".to_owned()] },
        "def\nZ←X PLUS Y\n\nZ←X+Y\nEND\n"
    )]
    #[case(Request::Define { lines: Vec::new() }, "def\nEND\n")]
    fn frames_requests(#[case] request: Request, #[case] expected: &str) {
        assert_eq!(framed(&request), expected);
    }

    #[test]
    fn reads_definition_lines_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("plus.apl");
        fs::write(&path, "Z←X PLUS Y\r\nZ←X+Y\r\n").expect("write source");

        let request = Request::from_command(CliCommand::Def { file: path }, "END")
            .expect("build request");
        assert_eq!(
            request,
            Request::Define {
                lines: vec!["Z←X PLUS Y".to_owned(), "Z←X+Y".to_owned()]
            }
        );
    }

    #[test]
    fn undecodable_bytes_are_replaced_rather_than_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("latin1.apl");
        fs::write(&path, b"Z\xE9F X\nZ\xE2X\n").expect("write source");

        let request = Request::from_command(CliCommand::Def { file: path }, "END")
            .expect("build request");
        assert_eq!(
            request,
            Request::Define {
                lines: vec!["Z\u{FFFD}F X".to_owned(), "Z\u{FFFD}X".to_owned()]
            }
        );
    }

    #[test]
    fn refuses_sources_containing_the_end_tag() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bad.apl");
        fs::write(&path, "F\nEND\nmore\n").expect("write source");

        let error = Request::from_command(CliCommand::Def { file: path }, "END")
            .expect_err("end tag inside source");
        assert!(matches!(error, AppError::EndTagInSource { line: 2, .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let error = Request::from_command(
            CliCommand::Def {
                file: PathBuf::from("/nonexistent/glyph/source.apl"),
            },
            "END",
        )
        .expect_err("missing file");
        assert!(matches!(error, AppError::ReadSource { .. }));
    }
}
