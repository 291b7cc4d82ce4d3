//! Daemon entrypoint for the Glyph definition server.
//!
//! The binary delegates to [`glyphd::run_daemon`] and reports any error on
//! stderr with a failing exit status.

use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match glyphd::run_daemon() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "glyphd: {error}");
            ExitCode::FAILURE
        }
    }
}
