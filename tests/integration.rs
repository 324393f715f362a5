// Integration tests for the ecoindex CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and stdout/stderr output.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the ecoindex binary.
fn ecoindex() -> Command {
    Command::cargo_bin("ecoindex").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    ecoindex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ecoindex"));
}

#[test]
fn cli_help_flag() {
    ecoindex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("environmental status indices"));
}

#[test]
fn analyze_requires_input() {
    ecoindex()
        .arg("analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn classify_requires_component() {
    ecoindex()
        .arg("classify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn analyze_rejects_unknown_format() {
    ecoindex()
        .args(["analyze", "input.json", "--format", "sarif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    // -q and -v are mutually exclusive
    ecoindex()
        .args(["-q", "-v", "classify", "Гумус"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
