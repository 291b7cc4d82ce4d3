//! Error types for socket listener operations.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced while binding or running the socket listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The TCP host could not be resolved.
    #[error("failed to resolve TCP address {host}:{port}: {source}")]
    Resolve {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
        /// Underlying resolver error.
        #[source]
        source: io::Error,
    },
    /// The TCP host resolved to no addresses.
    #[error("no TCP addresses resolved for {host}:{port}")]
    ResolveEmpty {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
    },
    /// Binding the TCP listener failed.
    #[error("failed to bind TCP listener at {addr}: {source}")]
    BindTcp {
        /// Address that could not be bound.
        addr: SocketAddr,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Switching the listener to non-blocking mode failed.
    #[error("failed to enable non-blocking listener: {source}")]
    NonBlocking {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Unix sockets are not available on this platform.
    #[cfg(not(unix))]
    #[error("unix sockets are unsupported for endpoint {endpoint}")]
    UnsupportedUnix {
        /// Configured endpoint.
        endpoint: String,
    },
    /// Binding the Unix listener failed.
    #[cfg(unix)]
    #[error("failed to bind unix listener at {path}: {source}")]
    BindUnix {
        /// Socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Another process is serving the Unix socket.
    #[cfg(unix)]
    #[error("unix socket {path} is already in use")]
    UnixInUse {
        /// Socket path.
        path: String,
    },
    /// The socket path exists but is not a socket.
    #[cfg(unix)]
    #[error("unix socket path {path} is not a socket")]
    UnixNotSocket {
        /// Socket path.
        path: String,
    },
    /// Inspecting an existing socket path failed.
    #[cfg(unix)]
    #[error("failed to inspect unix socket {path}: {source}")]
    UnixProbe {
        /// Socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Removing a stale socket file failed.
    #[cfg(unix)]
    #[error("failed to remove stale unix socket {path}: {source}")]
    UnixCleanup {
        /// Socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The accept thread panicked.
    #[error("listener thread panicked")]
    ThreadPanic,
}
