//! The Glyph definition daemon.
//!
//! `glyphd` accepts connections on the endpoint configured through
//! [`glyph_config`] and speaks a line protocol: each request is a command
//! line, optionally followed by a block of lines closed by the end tag, and
//! each response is one text body closed by the same tag. The `def` command
//! turns its block into a nested array of character rows with
//! [`glyph_array::materialize`] and hands it to the shared
//! [`glyph_eval::Evaluator`]; the rendered result token goes straight back to
//! the client, whether it names a new function or reports a diagnostic.
//!
//! Bootstrap loads configuration, installs structured telemetry, and
//! prepares the socket directory, reporting each stage through a
//! [`HealthReporter`]. [`run_daemon`] then serves until a termination signal
//! arrives.

mod bootstrap;
pub mod dispatch;
mod health;
mod process;
pub mod session;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{
    LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon, run_daemon_with,
};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{
    ConnectionHandler, ConnectionStream, ListenerError, ListenerHandle, SocketListener,
};

#[cfg(test)]
mod tests;
