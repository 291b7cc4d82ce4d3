//! Command-line client for the Glyph definition daemon.
//!
//! `glyph` loads the shared configuration, frames one request in the
//! daemon's line protocol, and prints the response body. Responses that
//! carry a protocol error or an interpreter diagnostic exit with status 1 so
//! scripts can tell a rejected definition from an accepted one.
//!
//! ```text
//! glyph def plus.apl     # prints the defined name, e.g. PLUS
//! glyph fn PLUS          # prints the stored source
//! glyph fnlist           # prints one name per line
//! ```

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

mod cli;
mod config;
mod errors;
mod request;
mod response;
mod transport;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;
use request::Request;
use response::Response;
use transport::DaemonLink;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams { stdout, stderr };
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(args: I, io: &mut IoStreams<'_, W, E>, loader: &L) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let result = Cli::try_parse_from(&split.command_arguments)
        .map_err(AppError::CliUsage)
        .and_then(|cli| {
            loader
                .load(&split.config_arguments)
                .map(|config| (cli, config))
        })
        .and_then(|(cli, config)| {
            let end_tag = config.end_tag();
            let request = Request::from_command(cli.command, end_tag)?;
            let response = DaemonLink::open(&config)?.exchange(&request)?;
            emit(&response, io)
        });

    match result {
        Ok(exit_code) => exit_code,
        Err(AppError::CliUsage(error)) => {
            let _ = write!(io.stderr, "{error}");
            if error.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(error) => {
            let _ = writeln!(io.stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn emit<W, E>(response: &Response, io: &mut IoStreams<'_, W, E>) -> Result<ExitCode, AppError>
where
    W: Write,
    E: Write,
{
    let write = |stream: &mut dyn Write| -> io::Result<()> {
        writeln!(stream, "{}", response.body())?;
        stream.flush()
    };
    if response.is_failure() {
        write(&mut *io.stderr).map_err(AppError::ForwardResponse)?;
        Ok(ExitCode::FAILURE)
    } else {
        write(&mut *io.stdout).map_err(AppError::ForwardResponse)?;
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests;
