//! Daemon bootstrap orchestration.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use glyph_config::{Config, SocketPreparationError};
use glyph_eval::{Interpreter, Workspace};

use crate::dispatch::{CommandRouter, DispatchConnectionHandler};
use crate::health::HealthReporter;
use crate::session::Protocol;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{ListenerError, ListenerHandle, SocketListener};

/// Abstracts configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the daemon configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader error when no configuration can be resolved.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a configuration resolved elsewhere.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already loaded configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// Socket preparation failed.
    #[error("failed to prepare daemon socket: {source}")]
    Socket {
        /// Filesystem error reported while preparing the socket directory.
        #[source]
        source: SocketPreparationError,
    },
}

/// A bootstrapped daemon, ready to serve.
pub struct Daemon {
    config: Config,
    interpreter: Arc<dyn Interpreter>,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Daemon {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Interpreter shared by every connection.
    #[must_use]
    pub fn interpreter(&self) -> Arc<dyn Interpreter> {
        Arc::clone(&self.interpreter)
    }

    /// Builds the connection handler for this daemon.
    #[must_use]
    pub fn connection_handler(&self) -> DispatchConnectionHandler {
        DispatchConnectionHandler::new(
            CommandRouter::new(self.interpreter()),
            Protocol::from_config(&self.config),
        )
    }

    /// Binds the configured endpoint and starts accepting connections.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the endpoint cannot be bound or served.
    pub fn start(&self) -> Result<ListenerHandle, ListenerError> {
        let listener = SocketListener::bind(self.config.daemon_socket())?;
        self.start_on(listener)
    }

    /// Starts serving on an already bound listener.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the listener cannot be started.
    pub fn start_on(&self, listener: SocketListener) -> Result<ListenerHandle, ListenerError> {
        let handle = listener.start(Arc::new(self.connection_handler()))?;
        self.reporter.listener_started(self.config.daemon_socket());
        Ok(handle)
    }

    /// Stops a listener started by this daemon and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] when the accept loop panicked.
    pub fn stop(&self, handle: ListenerHandle) -> Result<(), ListenerError> {
        handle.shutdown();
        handle.join()?;
        self.reporter.listener_stopped(self.config.daemon_socket());
        Ok(())
    }
}

impl std::fmt::Debug for Daemon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Daemon")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Bootstraps the daemon using the supplied collaborators.
///
/// Loads configuration, installs telemetry, prepares the socket directory,
/// and creates an empty workspace. Every step reports to `reporter`.
///
/// # Errors
///
/// Returns the [`BootstrapError`] of the first step that failed.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    if let Err(source) = config.daemon_socket().prepare_filesystem() {
        let error = BootstrapError::Socket { source };
        reporter.bootstrap_failed(&error);
        return Err(error);
    }

    reporter.bootstrap_succeeded(&config);
    Ok(Daemon {
        config,
        interpreter: Arc::new(Workspace::new()),
        telemetry,
        reporter,
    })
}
