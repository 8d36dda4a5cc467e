//! Integration tests for the hrcp CLI.
//!
//! These tests verify that the CLI binary behaves correctly, including
//! argument parsing, help text, and version output.

use assert_cmd::Command;
use predicates::prelude::*;

/// Test that the binary run without arguments displays usage.
#[test]
fn test_cli_no_arguments() {
    let mut cmd = Command::cargo_bin("hrcp").expect("Failed to find hrcp binary");

    // With clap subcommands required, no arguments should fail and show usage
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

/// Test that the --version flag displays version information.
#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::cargo_bin("hrcp").expect("Failed to find hrcp binary");

    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("hrcp"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that the --help flag lists every subcommand.
#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::cargo_bin("hrcp").expect("Failed to find hrcp binary");

    cmd.arg("--help");

    let assert = cmd
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains(
            "Inspect hierarchical resource configuration trees",
        ));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for command in ["get", "query", "show", "keys", "validate", "convert", "completions"] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

/// Test that an unknown subcommand fails with clap's usage error.
#[test]
fn test_cli_unknown_subcommand() {
    let mut cmd = Command::cargo_bin("hrcp").expect("Failed to find hrcp binary");

    cmd.arg("frobnicate");

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

/// Test that an invalid --format value is rejected at parse time.
#[test]
fn test_cli_invalid_format() {
    let mut cmd = Command::cargo_bin("hrcp").expect("Failed to find hrcp binary");

    cmd.args(["--format", "xml", "keys", "tree.json"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format"));
}

/// Test that completions are generated for the hrcp binary.
#[test]
fn test_cli_completions_bash() {
    let mut cmd = Command::cargo_bin("hrcp").expect("Failed to find hrcp binary");

    cmd.args(["completions", "bash"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_hrcp"));
}
