//! CLI entrypoint for the Glyph client.
//!
//! The binary delegates to [`glyph_cli::run`], which loads configuration,
//! parses the command, and exchanges one request with the daemon.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    glyph_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
