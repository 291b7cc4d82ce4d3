//! Built-in configuration defaults.

#[cfg(unix)]
use camino::Utf8PathBuf;
#[cfg(unix)]
use std::env;

#[cfg(unix)]
use dirs::runtime_dir;
#[cfg(unix)]
use libc::geteuid;

use crate::logging::LogFormat;
use crate::socket::SocketEndpoint;

/// TCP port used where Unix domain sockets are unavailable.
pub const DEFAULT_TCP_PORT: u16 = 9780;

/// Log filter applied when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Marker line closing request blocks and responses.
pub const DEFAULT_END_TAG: &str = "APL_NATIVE_END_TAG";

/// Largest request block accepted by default (1 MiB).
pub const DEFAULT_MAX_BLOCK_BYTES: usize = 1024 * 1024;

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

pub(crate) fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default log format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default end-of-response marker.
#[must_use]
pub const fn default_end_tag() -> &'static str {
    DEFAULT_END_TAG
}

pub(crate) fn default_end_tag_string() -> String {
    DEFAULT_END_TAG.to_owned()
}

/// Default daemon socket: `glyph/glyphd.sock` in the user's runtime
/// directory, or a per-user directory under the temp dir when no runtime
/// directory exists.
#[must_use]
pub fn default_socket_endpoint() -> SocketEndpoint {
    default_socket_endpoint_inner()
}

#[cfg(unix)]
fn default_socket_endpoint_inner() -> SocketEndpoint {
    let mut base = runtime_dir()
        .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
        .unwrap_or_else(|| {
            let mut fallback = Utf8PathBuf::from_path_buf(env::temp_dir())
                .unwrap_or_else(|_| Utf8PathBuf::from("/tmp"));
            // SAFETY: `geteuid` has no preconditions and cannot fail.
            let uid = unsafe { geteuid() };
            fallback.push(format!("glyph-uid-{uid}"));
            fallback
        });
    base.push("glyph");
    SocketEndpoint::unix(base.join("glyphd.sock"))
}

#[cfg(not(unix))]
fn default_socket_endpoint_inner() -> SocketEndpoint {
    SocketEndpoint::tcp("127.0.0.1", DEFAULT_TCP_PORT)
}
