//! Socket endpoint configuration.

use std::fmt;
use std::fs::DirBuilder;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Transport endpoint for daemon connections.
///
/// Endpoints are written as URLs (`unix:///run/glyph.sock`,
/// `tcp://127.0.0.1:9780`) in environment variables and flags. Configuration
/// files accept either the URL string or a table tagged by `transport`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Deserialize)]
#[serde(
    tag = "transport",
    rename_all = "snake_case",
    try_from = "EndpointRepr"
)]
pub enum SocketEndpoint {
    /// Unix domain socket endpoint.
    Unix {
        /// Filesystem path of the socket.
        path: Utf8PathBuf,
    },
    /// TCP socket endpoint.
    Tcp {
        /// Host name or address.
        host: String,
        /// TCP port.
        port: u16,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointRepr {
    Url(String),
    Table(TaggedEndpoint),
}

#[derive(Deserialize)]
#[serde(tag = "transport", rename_all = "snake_case")]
enum TaggedEndpoint {
    Unix { path: Utf8PathBuf },
    Tcp { host: String, port: u16 },
}

impl TryFrom<EndpointRepr> for SocketEndpoint {
    type Error = SocketParseError;

    fn try_from(repr: EndpointRepr) -> Result<Self, Self::Error> {
        match repr {
            EndpointRepr::Url(url) => url.parse(),
            EndpointRepr::Table(TaggedEndpoint::Unix { path }) => Ok(Self::Unix { path }),
            EndpointRepr::Table(TaggedEndpoint::Tcp { host, port }) => Ok(Self::Tcp { host, port }),
        }
    }
}

impl SocketEndpoint {
    /// Builds a Unix domain socket endpoint.
    #[must_use]
    pub fn unix(path: impl Into<Utf8PathBuf>) -> Self {
        Self::Unix { path: path.into() }
    }

    /// Builds a TCP socket endpoint.
    #[must_use]
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::Tcp {
            host: host.into(),
            port,
        }
    }

    /// Socket path for Unix endpoints.
    #[must_use]
    pub fn unix_path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Unix { path } => Some(path.as_ref()),
            Self::Tcp { .. } => None,
        }
    }

    /// Creates the parent directory of a Unix socket with owner-only
    /// permissions. TCP endpoints need no preparation.
    ///
    /// # Errors
    ///
    /// Returns [`SocketPreparationError`] when the path has no parent or the
    /// directory cannot be created.
    pub fn prepare_filesystem(&self) -> Result<(), SocketPreparationError> {
        let Some(path) = self.unix_path() else {
            return Ok(());
        };
        let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) else {
            return Err(SocketPreparationError::MissingParent {
                path: path.to_path_buf(),
            });
        };

        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }

        builder
            .create(parent.as_std_path())
            .map_err(|source| SocketPreparationError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })
    }
}

impl fmt::Display for SocketEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix { path } => write!(formatter, "unix://{path}"),
            Self::Tcp { host, port } => write!(formatter, "tcp://{host}:{port}"),
        }
    }
}

impl FromStr for SocketEndpoint {
    type Err = SocketParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(input)?;
        match url.scheme() {
            "unix" => {
                let path = url.path();
                if path.is_empty() {
                    return Err(SocketParseError::MissingUnixPath(input.to_owned()));
                }
                Ok(Self::unix(path))
            }
            "tcp" => {
                let host = url
                    .host_str()
                    .ok_or_else(|| SocketParseError::MissingHost(input.to_owned()))?;
                let port = url
                    .port()
                    .ok_or_else(|| SocketParseError::MissingPort(input.to_owned()))?;
                Ok(Self::tcp(host, port))
            }
            other => Err(SocketParseError::UnsupportedScheme(other.to_owned())),
        }
    }
}

/// Errors encountered while parsing a [`SocketEndpoint`] from text.
#[derive(Debug, Error)]
pub enum SocketParseError {
    /// Scheme was neither `unix` nor `tcp`.
    #[error("unsupported socket scheme '{0}'")]
    UnsupportedScheme(String),
    /// TCP host name was missing.
    #[error("missing TCP host in '{0}'")]
    MissingHost(String),
    /// TCP port was missing.
    #[error("missing TCP port in '{0}'")]
    MissingPort(String),
    /// Unix socket path was empty.
    #[error("missing Unix socket path in '{0}'")]
    MissingUnixPath(String),
    /// Text was not a URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Errors raised while preparing socket directories.
#[derive(Debug, Error)]
pub enum SocketPreparationError {
    /// The socket path has no parent directory.
    #[error("socket path '{path}' has no parent directory")]
    MissingParent {
        /// Configured socket path.
        path: Utf8PathBuf,
    },
    /// The parent directory could not be created.
    #[error("failed to create socket directory '{path}': {source}")]
    CreateDirectory {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
