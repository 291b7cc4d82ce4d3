//! Shared test doubles.

use std::ffi::OsString;
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use glyph_config::{Config, SocketEndpoint};
use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use crate::bootstrap::{BootstrapError, ConfigLoader};
use crate::health::HealthReporter;
use crate::process::{ShutdownError, ShutdownSignal};

/// End tag used by daemon-level tests.
pub(crate) const TEST_END_TAG: &str = "APL_NATIVE_END_TAG";

/// In-memory duplex stream: reads from a fixed script and records writes.
pub(crate) struct ScriptedStream {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

impl ScriptedStream {
    pub(crate) fn new(input: &[u8]) -> Self {
        Self {
            input: Cursor::new(input.to_vec()),
            output: Vec::new(),
        }
    }

    pub(crate) fn written(&self) -> &[u8] {
        &self.output
    }

    pub(crate) fn written_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink whose writes always fail, standing in for a vanished peer.
pub(crate) struct BrokenSink;

impl crate::session::ResponseSink for BrokenSink {
    fn write_bytes(&mut self, _data: &[u8]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"))
    }
}

/// Loader producing a loopback TCP configuration on an ephemeral port.
pub(crate) struct TestConfigLoader {
    config: Config,
}

impl TestConfigLoader {
    pub(crate) fn new() -> Self {
        Self {
            config: Config {
                daemon_socket: SocketEndpoint::tcp("127.0.0.1", 0),
                end_tag: TEST_END_TAG.to_owned(),
                ..Config::default()
            },
        }
    }

    /// Loader whose Unix socket sits below a regular file.
    pub(crate) fn with_unusable_socket_dir(dir: &TempDir) -> Self {
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").expect("write blocker file");
        let path = blocker.join("glyphd.sock");
        Self {
            config: Config {
                daemon_socket: SocketEndpoint::unix(path.to_str().expect("utf8 path")),
                ..Config::default()
            },
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Loader that fails by passing an unparsable flag value.
pub(crate) struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_iter([
            OsString::from("glyphd"),
            OsString::from("--max-block-bytes"),
            OsString::from("lots"),
        ])
    }
}

/// Shutdown signal that fires immediately.
pub(crate) struct ImmediateShutdown;

impl ShutdownSignal for ImmediateShutdown {
    fn wait(&self) -> Result<(), ShutdownError> {
        Ok(())
    }
}

/// Lifecycle events captured by [`RecordingHealthReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    ListenerStarted,
    ListenerStopped,
}

/// Records health events for assertions.
#[derive(Default)]
pub(crate) struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    pub(crate) fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn listener_started(&self, _endpoint: &SocketEndpoint) {
        self.record(HealthEvent::ListenerStarted);
    }

    fn listener_stopped(&self, _endpoint: &SocketEndpoint) {
        self.record(HealthEvent::ListenerStopped);
    }
}
