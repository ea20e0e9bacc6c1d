//! Daemon loop behavior: periodic registration and graceful de-registration.

mod common;

use std::time::Duration;

use common::{start_canned_runtime, start_mock_runtime, MockSlot};
use haproxy_register::{Daemon, Reconciler, RuntimeSocket, Shutdown};

#[tokio::test]
async fn daemon_registers_on_start_and_unregisters_once_on_shutdown() {
    let mock = start_mock_runtime(vec![
        MockSlot::new("web", "web1", "10.0.0.1", 2, 0, 100),
        MockSlot::new("web", "web2", "0.0.0.0", 0, 0, 900),
    ])
    .await;

    let reconciler = Reconciler::new(RuntimeSocket::new(mock.host(), mock.port()));
    let daemon = Daemon::new(
        reconciler,
        "web".to_string(),
        "10.0.0.5".to_string(),
        Duration::from_millis(50),
    );

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(daemon.run(shutdown.subscribe()));

    // Let a few cycles pass, then stop.
    tokio::time::sleep(Duration::from_millis(180)).await;
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("daemon did not stop after shutdown")
        .unwrap();

    let log = mock.command_log();
    let shows = log.iter().filter(|c| c.starts_with("show")).count();
    let maints = log.iter().filter(|c| c.ends_with("state maint")).count();
    let clears = log.iter().filter(|c| c.ends_with("addr 0.0.0.0")).count();

    // First cycle claims the slot, later cycles are no-ops, shutdown releases
    // it exactly once.
    assert!(shows >= 2, "expected repeated cycles, log: {log:?}");
    assert_eq!(maints, 1, "log: {log:?}");
    assert_eq!(clears, 1, "log: {log:?}");
    assert_eq!(mock.slot("web2").unwrap().addr, "0.0.0.0");
}

#[tokio::test]
async fn daemon_keeps_running_through_failed_cycles() {
    // Every response is unparseable, so every cycle fails.
    let mock = start_canned_runtime("not a state dump\n").await;

    let reconciler = Reconciler::new(RuntimeSocket::new(mock.host(), mock.port()));
    let daemon = Daemon::new(
        reconciler,
        "web".to_string(),
        "10.0.0.5".to_string(),
        Duration::from_millis(50),
    );

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(daemon.run(shutdown.subscribe()));

    tokio::time::sleep(Duration::from_millis(180)).await;
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("daemon did not stop after shutdown")
        .unwrap();

    let shows = mock
        .command_log()
        .iter()
        .filter(|c| c.starts_with("show"))
        .count();
    // One failed cycle must not end the loop.
    assert!(shows >= 2, "daemon stopped retrying after a failure");
}
