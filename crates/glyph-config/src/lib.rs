//! Shared configuration for the Glyph daemon and client.
//!
//! Configuration is layered by [`ortho_config`]: built-in defaults, then a
//! `glyph.toml` file (selected with `--config-path` or `GLYPH_CONFIG_PATH`),
//! then `GLYPH_*` environment variables, then command-line flags.
//!
//! ```toml
//! daemon_socket = "tcp://127.0.0.1:9780"
//! log_filter = "glyphd=debug"
//! log_format = "compact"
//! end_tag = "APL_NATIVE_END_TAG"
//! max_block_bytes = 1048576
//! ```

mod defaults;
mod logging;
mod socket;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_END_TAG, DEFAULT_LOG_FILTER, DEFAULT_MAX_BLOCK_BYTES, DEFAULT_TCP_PORT,
    default_end_tag, default_log_filter, default_log_format, default_socket_endpoint,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};

/// Resolved configuration shared by `glyphd` and `glyph`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "GLYPH")]
pub struct Config {
    /// Socket the daemon listens on and the client connects to.
    #[ortho_config(default = defaults::default_socket_endpoint())]
    pub daemon_socket: SocketEndpoint,
    /// `tracing` filter expression for daemon logs.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Daemon log output format.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Marker line closing request blocks and responses.
    #[ortho_config(default = defaults::default_end_tag_string())]
    pub end_tag: String,
    /// Upper bound on the bytes accepted in one request block.
    #[ortho_config(default = defaults::DEFAULT_MAX_BLOCK_BYTES)]
    pub max_block_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daemon_socket: defaults::default_socket_endpoint(),
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
            end_tag: defaults::default_end_tag_string(),
            max_block_bytes: defaults::DEFAULT_MAX_BLOCK_BYTES,
        }
    }
}

impl Config {
    /// Socket endpoint for daemon traffic.
    #[must_use]
    pub const fn daemon_socket(&self) -> &SocketEndpoint {
        &self.daemon_socket
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// End-of-block and end-of-response marker.
    #[must_use]
    pub fn end_tag(&self) -> &str {
        &self.end_tag
    }

    /// Maximum accepted request block size in bytes.
    #[must_use]
    pub const fn max_block_bytes(&self) -> usize {
        self.max_block_bytes
    }
}
