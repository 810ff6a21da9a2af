//! CLI argument handling tests.
//!
//! These only exercise code paths that exit before the terminal UI starts.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("plot-pilot")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plotting requests"))
        .stdout(predicate::str::contains("--endpoint"));
}

#[test]
fn missing_path_is_rejected_before_the_ui_starts() {
    Command::cargo_bin("plot-pilot")
        .unwrap()
        .arg("/definitely/not/here.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn invalid_endpoint_is_rejected() {
    Command::cargo_bin("plot-pilot")
        .unwrap()
        .args(["--endpoint", "not a url"])
        .assert()
        .failure();
}
