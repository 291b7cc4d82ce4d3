//! Connection streams and the handler seam.

use std::io::{self, Read, Write};
use std::net::TcpStream;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

/// A connected client stream.
pub enum ConnectionStream {
    /// TCP client.
    Tcp(TcpStream),
    /// Unix domain socket client.
    #[cfg(unix)]
    Unix(UnixStream),
}

impl ConnectionStream {
    /// Describes the peer for log output.
    #[must_use]
    pub fn peer(&self) -> String {
        match self {
            Self::Tcp(stream) => stream
                .peer_addr()
                .map_or_else(|_| "tcp:unknown".to_owned(), |addr| format!("tcp:{addr}")),
            #[cfg(unix)]
            Self::Unix(_) => "unix".to_owned(),
        }
    }
}

impl Read for ConnectionStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for ConnectionStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Unix(stream) => stream.flush(),
        }
    }
}

/// Serves accepted connections.
///
/// Each connection runs on its own thread, so implementations must be
/// shareable and should not panic.
pub trait ConnectionHandler: Send + Sync + 'static {
    /// Serves one connection until the client leaves or a fatal error occurs.
    fn handle(&self, stream: ConnectionStream);
}
