//! Command routing.
//!
//! The router maps a parsed [`CommandLine`] to a [`Command`] and runs its
//! handler against the shared interpreter. Routing errors that leave the
//! stream in a known state are returned for the caller to answer in-band.

use std::io::{Read, Write};
use std::sync::Arc;

use glyph_eval::Interpreter;
use tracing::debug;

use crate::session::{BlockSource, Session};

use super::catalog::{respond_function, respond_function_list};
use super::define::run_define;
use super::errors::DispatchError;
use super::request::CommandLine;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Commands understood by the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Define a function from the following block.
    Define,
    /// Fetch the source of a function.
    Function {
        /// Function name.
        name: String,
    },
    /// List defined function names.
    FunctionList,
    /// Close the connection.
    Quit,
}

impl Command {
    /// Resolves a command line into a command.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownCommand`] for unrecognised names and
    /// [`DispatchError::InvalidArguments`] when the arguments do not fit.
    pub fn parse(line: &CommandLine) -> Result<Self, DispatchError> {
        let arguments = line.arguments();
        match line.name() {
            "def" => no_arguments(line).map(|()| Self::Define),
            "fnlist" => no_arguments(line).map(|()| Self::FunctionList),
            "quit" => no_arguments(line).map(|()| Self::Quit),
            "fn" => match arguments {
                [name] if !name.trim().is_empty() => Ok(Self::Function {
                    name: name.trim().to_owned(),
                }),
                _ => Err(DispatchError::invalid_arguments(
                    "fn expects exactly one function name",
                )),
            },
            other => Err(DispatchError::unknown_command(other)),
        }
    }
}

fn no_arguments(line: &CommandLine) -> Result<(), DispatchError> {
    if line.arguments().is_empty() {
        Ok(())
    } else {
        Err(DispatchError::invalid_arguments(format!(
            "{} takes no arguments",
            line.name()
        )))
    }
}

/// What the connection loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Close the connection.
    Close,
}

/// Routes commands to their handlers.
#[derive(Clone)]
pub struct CommandRouter {
    interpreter: Arc<dyn Interpreter>,
}

impl CommandRouter {
    /// Creates a router over a shared interpreter.
    pub fn new(interpreter: Arc<dyn Interpreter>) -> Self {
        Self { interpreter }
    }

    /// Runs `line` against the interpreter, writing its response to
    /// `session`.
    ///
    /// # Errors
    ///
    /// Returns routing errors before anything is written, and any failure of
    /// the handler itself. A rejected `def` line still consumes its block so
    /// the error is the only response to the request.
    pub fn route<S>(
        &self,
        line: &CommandLine,
        session: &mut Session<S>,
    ) -> Result<Flow, DispatchError>
    where
        S: Read + Write,
    {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(error) => {
                if line.name() == "def" {
                    session.load_block()?;
                }
                return Err(error);
            }
        };
        debug!(target: DISPATCH_TARGET, ?command, "dispatching command");
        let end_tag = session.protocol().end_tag().to_owned();
        let interpreter = self.interpreter.as_ref();
        match command {
            Command::Define => run_define(session, interpreter, &end_tag)?,
            Command::Function { name } => respond_function(interpreter, &name, session, &end_tag)?,
            Command::FunctionList => respond_function_list(interpreter, session, &end_tag)?,
            Command::Quit => return Ok(Flow::Close),
        }
        Ok(Flow::Continue)
    }
}

impl std::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRouter").finish_non_exhaustive()
    }
}
