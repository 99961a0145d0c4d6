//! Behavior tests for the `vixwatch` binary: exit codes and the stdout contract.
//!
//! No case needs network access. Configuration errors stop before any
//! provider is contacted, and the full run uses a 1 ms timeout with a single
//! attempt, so every provider fails quickly.

use std::process::{Command, Output};

fn vixwatch(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_vixwatch"));
    command
        .args(args)
        .env_remove("GITHUB_OUTPUT")
        .env_remove("VIXWATCH_THRESHOLD")
        .env_remove("VIX_THRESHOLD")
        .env_remove("VIXWATCH_MAX_ATTEMPTS")
        .env_remove("VIXWATCH_RETRY_DELAY_MS")
        .env_remove("VIXWATCH_TIMEOUT_MS")
        .env_remove("VIXWATCH_LOG");
    for (name, value) in env {
        command.env(name, value);
    }
    command.output().expect("binary should launch")
}

// =============================================================================
// Invalid configuration
// =============================================================================

#[test]
fn when_env_config_is_invalid_binary_exits_three_without_a_record() {
    // Given: a zero attempt count in the environment
    // When: the binary runs
    let output = vixwatch(&[], &[("VIXWATCH_MAX_ATTEMPTS", "0")]);

    // Then: exit 3, nothing on stdout, the reason on stderr
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_attempts"));
}

#[test]
fn when_threshold_env_is_not_a_number_binary_exits_three() {
    let output = vixwatch(&[], &[("VIX_THRESHOLD", "high")]);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
}

#[test]
fn when_flag_override_is_invalid_binary_exits_three() {
    let output = vixwatch(&["--timeout-ms", "0"], &[]);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
}

#[test]
fn when_arguments_are_malformed_binary_exits_three() {
    for args in [&["--threshold", "abc"][..], &["--no-such-flag"][..]] {
        let output = vixwatch(args, &[]);
        assert_eq!(output.status.code(), Some(3), "args {args:?}");
        assert!(output.stdout.is_empty());
    }
}

// =============================================================================
// Help
// =============================================================================

#[test]
fn when_help_is_requested_binary_exits_zero() {
    let output = vixwatch(&["--help"], &[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--threshold"));
}

// =============================================================================
// Full run: every provider fails
// =============================================================================

#[test]
fn when_every_provider_fails_binary_prints_one_error_record_and_exits_two() {
    // Given: one attempt per source, no retry delay, and an unmeetable timeout,
    // with a malformed threshold variable that the flag replaces
    let output = vixwatch(
        &[
            "--max-attempts",
            "1",
            "--retry-delay-ms",
            "0",
            "--timeout-ms",
            "1",
            "--threshold",
            "30",
        ],
        &[("VIXWATCH_THRESHOLD", "abc")],
    );

    // Then: exit 2 with exactly one JSON line on stdout
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf-8");
    assert_eq!(stdout.lines().count(), 1, "stdout: {stdout}");

    let record: serde_json::Value =
        serde_json::from_str(stdout.trim_end()).expect("stdout line is json");
    assert!(record.get("vix").is_none());
    assert!(record.get("exceeded").is_none());
    assert!(record.get("source_used").is_none());
    assert_eq!(record["threshold"], serde_json::json!(30.0));
    assert!(record["timestamp"].as_str().is_some_and(|ts| ts.ends_with('Z')));

    // And: the error names every provider in chain order
    let error = record["error"].as_str().expect("error is a string");
    assert!(error.starts_with("all 6 source(s) failed"), "error: {error}");
    let positions: Vec<usize> = [
        "yahoo_intraday:",
        "yahoo_daily:",
        "cnbc:",
        "investing:",
        "yahoo_direct:",
        "cboe:",
    ]
    .iter()
    .map(|id| error.find(id).unwrap_or_else(|| panic!("{id} missing from {error}")))
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    // And: diagnostics went to stderr only
    assert!(!output.stderr.is_empty());
}
