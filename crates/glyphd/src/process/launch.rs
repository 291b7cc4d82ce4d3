//! Runs the daemon from bootstrap to shutdown.

use std::sync::Arc;

use tracing::{info, warn};

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Runs the daemon with the production collaborators.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap, the listener, or signal handling
/// fails.
pub fn run_daemon() -> Result<(), LaunchError> {
    run_daemon_with(
        &SystemConfigLoader,
        Arc::new(StructuredHealthReporter::new()),
        &SystemShutdownSignal::new(),
    )
}

/// Runs the daemon with injected collaborators.
///
/// The listener is stopped even when waiting for the shutdown signal fails.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap, the listener, or signal handling
/// fails.
pub fn run_daemon_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    shutdown: &dyn ShutdownSignal,
) -> Result<(), LaunchError> {
    let daemon = bootstrap_with(loader, reporter)?;
    let handle = daemon.start()?;
    info!(target: PROCESS_TARGET, "daemon running");

    let waited = shutdown.wait();
    if let Err(error) = &waited {
        warn!(target: PROCESS_TARGET, %error, "shutdown wait failed; stopping listener");
    }
    daemon.stop(handle)?;
    waited?;
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
