//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to read '{path}': {source}")]
    ReadSource { path: PathBuf, source: io::Error },
    #[error("line {line} of '{path}' is the end tag and would cut the definition short")]
    EndTagInSource { path: PathBuf, line: usize },
    #[error("failed to resolve daemon address {endpoint}: {source}")]
    Resolve { endpoint: String, source: io::Error },
    #[error("failed to connect to daemon at {endpoint}: {source}")]
    Connect { endpoint: String, source: io::Error },
    #[cfg(not(unix))]
    #[error("platform does not support Unix sockets: {0}")]
    UnsupportedUnixTransport(String),
    #[error("failed to send request to daemon: {0}")]
    SendRequest(io::Error),
    #[error("failed to read response from daemon: {0}")]
    ReadResponse(io::Error),
    #[error("daemon closed the connection before the end tag")]
    MissingEndTag,
    #[error("failed to forward daemon output: {0}")]
    ForwardResponse(io::Error),
}
