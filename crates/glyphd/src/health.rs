//! Structured health reporting for daemon lifecycle events.

use std::sync::Arc;

use glyph_config::{Config, SocketEndpoint};

use crate::bootstrap::BootstrapError;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer for daemon lifecycle events.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the listener accepts connections.
    fn listener_started(&self, endpoint: &SocketEndpoint);

    /// Invoked after the listener has shut down.
    fn listener_stopped(&self, endpoint: &SocketEndpoint);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter + ?Sized,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn listener_started(&self, endpoint: &SocketEndpoint) {
        (**self).listener_started(endpoint);
    }

    fn listener_stopped(&self, endpoint: &SocketEndpoint) {
        (**self).listener_stopped(endpoint);
    }
}

/// Reporter that records lifecycle events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting daemon bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            socket = %config.daemon_socket(),
            log_filter = %config.log_filter(),
            log_format = %config.log_format(),
            end_tag = %config.end_tag(),
            max_block_bytes = config.max_block_bytes(),
            "daemon bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "daemon bootstrap failed"
        );
    }

    fn listener_started(&self, endpoint: &SocketEndpoint) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_started",
            endpoint = %endpoint,
            "accepting connections"
        );
    }

    fn listener_stopped(&self, endpoint: &SocketEndpoint) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_stopped",
            endpoint = %endpoint,
            "listener shut down"
        );
    }
}
