//! Accept loop for the daemon socket.

use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use glyph_config::SocketEndpoint;

use super::{ConnectionHandler, ConnectionStream, LISTENER_TARGET, ListenerError};

#[cfg(unix)]
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::FileTypeExt;
#[cfg(unix)]
use std::os::unix::net::{UnixListener, UnixStream};
#[cfg(unix)]
use std::path::Path;

const IDLE_BACKOFF: Duration = Duration::from_millis(25);
const ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// A bound, not yet serving, socket listener.
#[derive(Debug)]
pub struct SocketListener {
    endpoint: SocketEndpoint,
    socket: BoundSocket,
}

#[derive(Debug)]
enum BoundSocket {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix(UnixListener),
}

impl BoundSocket {
    fn set_nonblocking(&self) -> io::Result<()> {
        match self {
            Self::Tcp(listener) => listener.set_nonblocking(true),
            #[cfg(unix)]
            Self::Unix(listener) => listener.set_nonblocking(true),
        }
    }

    /// Accepts one pending connection, returning `None` when none is waiting.
    fn accept(&self) -> io::Result<Option<ConnectionStream>> {
        let accepted = match self {
            Self::Tcp(listener) => listener.accept().and_then(|(stream, _)| {
                stream.set_nonblocking(false)?;
                Ok(ConnectionStream::Tcp(stream))
            }),
            #[cfg(unix)]
            Self::Unix(listener) => listener.accept().and_then(|(stream, _)| {
                stream.set_nonblocking(false)?;
                Ok(ConnectionStream::Unix(stream))
            }),
        };
        match accepted {
            Ok(stream) => Ok(Some(stream)),
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(error) => Err(error),
        }
    }
}

impl SocketListener {
    /// Binds the endpoint.
    ///
    /// Stale Unix socket files left by a crashed daemon are removed; a socket
    /// another process still serves is reported as in use.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when resolution or binding fails.
    pub fn bind(endpoint: &SocketEndpoint) -> Result<Self, ListenerError> {
        let socket = match endpoint {
            SocketEndpoint::Tcp { host, port } => BoundSocket::Tcp(bind_tcp(host, *port)?),
            #[cfg(unix)]
            SocketEndpoint::Unix { path } => BoundSocket::Unix(bind_unix(path.as_std_path())?),
            #[cfg(not(unix))]
            SocketEndpoint::Unix { .. } => {
                return Err(ListenerError::UnsupportedUnix {
                    endpoint: endpoint.to_string(),
                });
            }
        };
        Ok(Self {
            endpoint: endpoint.clone(),
            socket,
        })
    }

    /// Local address of a TCP listener.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match &self.socket {
            BoundSocket::Tcp(listener) => listener.local_addr().ok(),
            #[cfg(unix)]
            BoundSocket::Unix(_) => None,
        }
    }

    /// Starts accepting connections on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::NonBlocking`] when the socket cannot be
    /// switched to non-blocking mode.
    pub fn start(self, handler: Arc<dyn ConnectionHandler>) -> Result<ListenerHandle, ListenerError> {
        if let Err(source) = self.socket.set_nonblocking() {
            #[cfg(unix)]
            remove_socket_file(&self.endpoint);
            return Err(ListenerError::NonBlocking { source });
        }
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let thread = thread::spawn(move || self.accept_until(&flag, &handler));
        Ok(ListenerHandle {
            shutdown,
            thread: Some(thread),
        })
    }

    fn accept_until(self, shutdown: &AtomicBool, handler: &Arc<dyn ConnectionHandler>) {
        info!(target: LISTENER_TARGET, endpoint = %self.endpoint, "listening");
        let next_id = AtomicU64::new(1);
        let mut last_error = None::<io::ErrorKind>;
        while !shutdown.load(Ordering::SeqCst) {
            match self.socket.accept() {
                Ok(Some(stream)) => {
                    last_error = None;
                    let id = next_id.fetch_add(1, Ordering::Relaxed);
                    spawn_connection(id, stream, Arc::clone(handler));
                }
                Ok(None) => thread::sleep(IDLE_BACKOFF),
                Err(error) => {
                    // Repeated identical failures are logged once.
                    if last_error != Some(error.kind()) {
                        warn!(target: LISTENER_TARGET, %error, "accept failed");
                    }
                    last_error = Some(error.kind());
                    thread::sleep(ERROR_BACKOFF);
                }
            }
        }
        info!(target: LISTENER_TARGET, endpoint = %self.endpoint, "listener stopped");

        #[cfg(unix)]
        remove_socket_file(&self.endpoint);
    }
}

fn spawn_connection(id: u64, stream: ConnectionStream, handler: Arc<dyn ConnectionHandler>) {
    let peer = stream.peer();
    debug!(target: LISTENER_TARGET, connection = id, %peer, "connection accepted");
    let spawned = thread::Builder::new()
        .name(format!("glyphd-conn-{id}"))
        .spawn(move || {
            handler.handle(stream);
            debug!(target: LISTENER_TARGET, connection = id, "connection finished");
        });
    if let Err(error) = spawned {
        warn!(target: LISTENER_TARGET, connection = id, %error, "failed to spawn connection thread");
    }
}

/// Handle to a running listener.
///
/// Dropping the handle requests shutdown without waiting for the accept
/// thread.
pub struct ListenerHandle {
    shutdown: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ListenerHandle {
    /// Asks the accept loop to stop.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Waits for the accept loop to exit.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] if the accept thread panicked.
    pub fn join(mut self) -> Result<(), ListenerError> {
        self.thread
            .take()
            .map_or(Ok(()), |thread| thread.join().map_err(|_| ListenerError::ThreadPanic))
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn bind_tcp(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    let addr = (host, port)
        .to_socket_addrs()
        .map_err(|source| ListenerError::Resolve {
            host: host.to_owned(),
            port,
            source,
        })?
        .next()
        .ok_or_else(|| ListenerError::ResolveEmpty {
            host: host.to_owned(),
            port,
        })?;
    TcpListener::bind(addr).map_err(|source| ListenerError::BindTcp { addr, source })
}

#[cfg(unix)]
fn bind_unix(path: &Path) -> Result<UnixListener, ListenerError> {
    let display = || path.display().to_string();
    if path.exists() {
        let metadata = fs::symlink_metadata(path).map_err(|source| ListenerError::UnixProbe {
            path: display(),
            source,
        })?;
        if !metadata.file_type().is_socket() {
            return Err(ListenerError::UnixNotSocket { path: display() });
        }
        match UnixStream::connect(path) {
            Ok(_live) => return Err(ListenerError::UnixInUse { path: display() }),
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::ConnectionRefused | io::ErrorKind::NotFound
                ) =>
            {
                fs::remove_file(path).map_err(|source| ListenerError::UnixCleanup {
                    path: display(),
                    source,
                })?;
            }
            Err(source) => {
                return Err(ListenerError::UnixProbe {
                    path: display(),
                    source,
                });
            }
        }
    }
    UnixListener::bind(path).map_err(|source| ListenerError::BindUnix {
        path: display(),
        source,
    })
}

#[cfg(unix)]
fn remove_socket_file(endpoint: &SocketEndpoint) {
    let Some(path) = endpoint.unix_path() else {
        return;
    };
    if let Err(error) = fs::remove_file(path.as_std_path())
        && error.kind() != io::ErrorKind::NotFound
    {
        warn!(target: LISTENER_TARGET, %error, %path, "failed to remove unix socket file");
    }
}
