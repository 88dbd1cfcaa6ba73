//! Tests for the `engine-connector` binary

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_engine-connector"))
        .args(args)
        .output()
        .expect("failed to run engine-connector")
}

#[test]
fn test_missing_engine_argument_is_usage_error() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_help_exits_successfully() {
    let output = run(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("engine-connector"));
}

#[test]
fn test_unknown_engine_exits_with_failure() {
    let output = run(&["/nonexistent/engine"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to launch engine"), "{stderr}");
}

#[test]
fn test_cat_round_trip() {
    let output = run(&["cat"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Engine started with PID "), "{stdout}");
    assert!(stdout.contains("Sent: uci\n"), "{stdout}");
    assert!(stdout.contains("Received:\nuci\n"), "{stdout}");
    assert!(stdout.trim_end().ends_with("Engine terminated."), "{stdout}");
}

#[test]
fn test_silent_engine_reports_timeout() {
    let output = run(&["--timeout-ms", "200", "sleep", "5"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Timeout: No output received."), "{stdout}");
    assert!(stdout.contains("Engine terminated."), "{stdout}");
}

#[test]
fn test_engine_arguments_may_start_with_hyphen() {
    let output = run(&["--command", "isready", "sh", "-c", "read line; echo \"got $line\""]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sent: isready"), "{stdout}");
    assert!(stdout.contains("got isready"), "{stdout}");
}

#[test]
fn test_zero_buffer_size_is_rejected() {
    let output = run(&["--buffer-size", "0", "cat"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_connector_flags_after_engine_go_to_engine() {
    let output = run(&["echo", "--command", "go", "--timeout-ms", "1"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sent: uci\n"), "{stdout}");
    assert!(
        stdout.contains("Received:\n--command go --timeout-ms 1\n"),
        "{stdout}"
    );
}

#[test]
fn test_help_after_engine_is_not_connector_help() {
    let output = run(&["sh", "-c", "echo \"$1\"", "sh", "--help"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Usage: engine-connector"), "{stdout}");
    assert!(stdout.starts_with("Engine started with PID "), "{stdout}");
    assert!(stdout.contains("Received:\n--help\n"), "{stdout}");
}

#[test]
fn test_huge_buffer_size_does_not_panic() {
    let output = run(&["--buffer-size", "18446744073709551615", "cat"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Received:\nuci\n"), "{stdout}");
}
