//! CLI argument definitions for the Glyph client.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface for talking to `glyphd`.
#[derive(Parser, Debug)]
#[command(name = "glyph", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Request to send to the daemon.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Requests understood by the daemon.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Defines a function from a source file, header line first.
    Def {
        /// File holding the function source.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Prints the source of a defined function.
    Fn {
        /// Function name.
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Lists defined function names.
    Fnlist,
}
