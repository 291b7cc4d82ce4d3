//! Daemon link for one request/response cycle.
//!
//! A [`DaemonLink`] owns the connected stream together with the end tag that
//! frames both the outgoing block and the incoming response, so callers only
//! hand over a [`Request`] and get back a [`Response`].

use std::io::{self, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use glyph_config::{Config, SocketEndpoint};

use crate::errors::AppError;
use crate::request::Request;
use crate::response::Response;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

trait Duplex: Read + Write {}

impl<T: Read + Write> Duplex for T {}

/// Connected daemon stream plus the framing it speaks.
pub(crate) struct DaemonLink {
    stream: BufReader<Box<dyn Duplex>>,
    end_tag: String,
}

impl DaemonLink {
    /// Connects to the daemon socket named by `config`.
    pub(crate) fn open(config: &Config) -> Result<Self, AppError> {
        let endpoint = config.daemon_socket();
        let stream: Box<dyn Duplex> = match endpoint {
            SocketEndpoint::Tcp { host, port } => Box::new(open_tcp(endpoint, host, *port)?),
            SocketEndpoint::Unix { path } => open_unix(endpoint, path.as_std_path())?,
        };
        Ok(Self {
            stream: BufReader::new(stream),
            end_tag: config.end_tag().to_owned(),
        })
    }

    /// Sends `request` and reads the framed response.
    pub(crate) fn exchange(mut self, request: &Request) -> Result<Response, AppError> {
        request.write_to(self.stream.get_mut(), &self.end_tag)?;
        Response::read_from(&mut self.stream, &self.end_tag)
    }
}

/// Tries each resolved address in turn and keeps the last refusal.
fn open_tcp(endpoint: &SocketEndpoint, host: &str, port: u16) -> Result<TcpStream, AppError> {
    let addresses = (host, port)
        .to_socket_addrs()
        .map_err(|source| AppError::Resolve {
            endpoint: endpoint.to_string(),
            source,
        })?;
    let mut last_error =
        io::Error::new(io::ErrorKind::AddrNotAvailable, "host resolved to no addresses");
    for address in addresses {
        match TcpStream::connect_timeout(&address, CONNECT_TIMEOUT) {
            Ok(stream) => return Ok(stream),
            Err(error) => last_error = error,
        }
    }
    Err(AppError::Connect {
        endpoint: endpoint.to_string(),
        source: last_error,
    })
}

#[cfg(unix)]
fn open_unix(
    endpoint: &SocketEndpoint,
    path: &std::path::Path,
) -> Result<Box<dyn Duplex>, AppError> {
    use socket2::{Domain, SockAddr, Socket, Type};
    use std::os::unix::net::UnixStream;

    let connect = || -> io::Result<UnixStream> {
        let socket = Socket::new(Domain::UNIX, Type::STREAM, None)?;
        socket.connect_timeout(&SockAddr::unix(path)?, CONNECT_TIMEOUT)?;
        Ok(socket.into())
    };
    connect()
        .map(|stream| Box::new(stream) as Box<dyn Duplex>)
        .map_err(|source| AppError::Connect {
            endpoint: endpoint.to_string(),
            source,
        })
}

#[cfg(not(unix))]
fn open_unix(
    endpoint: &SocketEndpoint,
    _path: &std::path::Path,
) -> Result<Box<dyn Duplex>, AppError> {
    Err(AppError::UnsupportedUnixTransport(endpoint.to_string()))
}
