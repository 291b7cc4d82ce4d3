//! Command dispatch for the line protocol.
//!
//! A client sends a command line, optionally followed by a block of lines
//! closed by the end tag. Every response is a single text body followed by
//! a newline, the end tag, and a newline:
//!
//! ```text
//! def
//! Z←X PLUS Y
//! Z←X+Y
//! APL_NATIVE_END_TAG
//! ```
//!
//! ```text
//! PLUS
//! APL_NATIVE_END_TAG
//! ```
//!
//! ## Commands
//!
//! - `def`: define a function from the following block.
//! - `fn:NAME`: return the source lines of a defined function.
//! - `fnlist`: return the names of all defined functions.
//! - `quit`: close the connection.
//!
//! Protocol mistakes (unknown commands, bad arguments) are answered with an
//! `error:` body and the connection stays open. Transport failures, oversized
//! or unterminated blocks, malformed values, and evaluator faults close the
//! connection.

mod catalog;
mod define;
mod errors;
mod handler;
mod request;
mod response;
mod router;

pub use self::define::{invoke_and_respond, run_define};
pub use self::errors::DispatchError;
pub use self::handler::DispatchConnectionHandler;
pub use self::request::CommandLine;
pub use self::response::ResponseWriter;
pub use self::router::{Command, CommandRouter, Flow};
