//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.
//! Every test runs with an isolated HOME and working directory so no real
//! config file or portal is involved.

use std::process::{Command, Output};

/// Port 9 (discard) is closed on test machines, connections are refused fast.
const UNREACHABLE_PORTAL: &str = "http://127.0.0.1:9";

fn run_nbwatch(args: &[&str]) -> Output {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    Command::new(env!("CARGO_BIN_EXE_nbwatch"))
        .current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .env_remove("NBWATCH_PORTAL_URL")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute nbwatch")
}

#[test]
fn test_help_succeeds() {
    let output = run_nbwatch(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("list"));
    assert!(stdout.contains("watch"));
    assert!(stdout.contains("remove"));
}

#[test]
fn test_remove_requires_notebook_argument() {
    let output = run_nbwatch(&["remove"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("<notebook>"),
        "Expected usage error naming the argument, got: {}",
        stderr
    );
}

#[test]
fn test_missing_portal_url_is_reported() {
    let output = run_nbwatch(&["list"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No portal URL configured"),
        "Expected configuration hint, got: {}",
        stderr
    );
}

#[test]
fn test_invalid_portal_url_is_rejected() {
    let output = run_nbwatch(&["--portal", "ftp://portal.example.org", "list"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid configuration") || stderr.contains("Invalid portal URL"),
        "Expected URL validation error, got: {}",
        stderr
    );
}

/// Verify an unreachable portal fails the command without polluting stdout
#[test]
fn test_unreachable_portal_fails_cleanly() {
    let output = run_nbwatch(&["list", "--json", "--portal", UNREACHABLE_PORTAL]);

    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        stderr.contains("Failed to list notebooks"),
        "Expected failure message on stderr, got: {}",
        stderr
    );
}

/// Verify that default mode suppresses INFO-level logs
#[test]
fn test_default_mode_suppresses_info_logs() {
    let output = run_nbwatch(&["list", "--portal", UNREACHABLE_PORTAL]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should suppress INFO logs, but stderr contains: {}",
        stderr
    );
    assert!(
        !stderr.contains(r#""level":"WARN""#),
        "Default mode should suppress WARN logs, but stderr contains: {}",
        stderr
    );
}

/// Verify that verbose mode emits structured INFO logs on stderr
#[test]
fn test_verbose_mode_emits_info_logs() {
    let output = run_nbwatch(&["-v", "list", "--portal", UNREACHABLE_PORTAL]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains(r#""event":"cli.list_started""#),
        "Verbose mode should log cli.list_started, got: {}",
        stderr
    );
    assert!(
        !stdout.contains(r#""event":"#),
        "Logs must never go to stdout, got: {}",
        stdout
    );
}
