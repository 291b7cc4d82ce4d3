//! Unit tests for daemon bootstrap and launch.

use std::sync::Arc;

use glyph_eval::FunctionCatalog;
use rstest::rstest;

use crate::{BootstrapError, bootstrap_with, run_daemon_with};

use super::support::{
    FailingConfigLoader, HealthEvent, ImmediateShutdown, RecordingHealthReporter, TEST_END_TAG,
    TestConfigLoader,
};

#[rstest]
fn bootstrap_reports_success() {
    let reporter = Arc::new(RecordingHealthReporter::default());
    let daemon =
        bootstrap_with(&TestConfigLoader::new(), reporter.clone()).expect("bootstrap succeeds");

    assert_eq!(daemon.config().end_tag(), TEST_END_TAG);
    assert_eq!(
        reporter.events(),
        vec![HealthEvent::BootstrapStarting, HealthEvent::BootstrapSucceeded]
    );
}

#[rstest]
fn bootstrap_starts_with_an_empty_workspace() {
    let reporter = Arc::new(RecordingHealthReporter::default());
    let daemon = bootstrap_with(&TestConfigLoader::new(), reporter).expect("bootstrap succeeds");

    let names = daemon
        .interpreter()
        .function_names()
        .expect("list functions");
    assert!(names.is_empty());
}

#[rstest]
fn bootstrap_surfaces_configuration_errors() {
    let reporter = Arc::new(RecordingHealthReporter::default());
    let error = bootstrap_with(&FailingConfigLoader, reporter.clone()).expect_err("bad config");

    assert!(matches!(error, BootstrapError::Configuration { .. }));
    assert!(matches!(
        reporter.events().last(),
        Some(HealthEvent::BootstrapFailed(_))
    ));
}

#[cfg(unix)]
#[rstest]
fn bootstrap_surfaces_socket_preparation_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let loader = TestConfigLoader::with_unusable_socket_dir(&dir);
    let reporter = Arc::new(RecordingHealthReporter::default());

    let error = bootstrap_with(&loader, reporter).expect_err("socket dir under a file");
    assert!(matches!(error, BootstrapError::Socket { .. }));
}

#[rstest]
fn run_daemon_stops_listener_after_shutdown_signal() {
    let reporter = Arc::new(RecordingHealthReporter::default());
    run_daemon_with(&TestConfigLoader::new(), reporter.clone(), &ImmediateShutdown)
        .expect("daemon runs");

    assert_eq!(
        reporter.events(),
        vec![
            HealthEvent::BootstrapStarting,
            HealthEvent::BootstrapSucceeded,
            HealthEvent::ListenerStarted,
            HealthEvent::ListenerStopped,
        ]
    );
}
