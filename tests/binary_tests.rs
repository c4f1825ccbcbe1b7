//! Binary tests for the estimator CLI
//!
//! These run the built `estimator` binary as a subprocess.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn estimator() -> Command {
    Command::cargo_bin("estimator").unwrap()
}

fn test_data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

#[test]
fn test_help() {
    estimator()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("calculate"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_modules_command() {
    estimator()
        .arg("modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule Implementation"))
        .stdout(predicate::str::contains("Data Transformation"));
}

#[test]
fn test_calculate_prints_breakdown() {
    estimator()
        .env("NO_COLOR", "1")
        .arg("calculate")
        .arg(test_data("rule_estimate.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("$221,404.80"))
        .stdout(predicate::str::contains("$464,950.08"));
}

#[test]
fn test_calculate_scaling_flag_overrides_file() {
    estimator()
        .env("NO_COLOR", "1")
        .arg("calculate")
        .arg(test_data("rule_estimate.yaml"))
        .args(["--scaling", "2", "--platform", "0", "--profit", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$442,809.60"));
}

#[test]
fn test_calculate_missing_fields_warns() {
    estimator()
        .env("NO_COLOR", "1")
        .arg("calculate")
        .arg(test_data("missing_hours.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing resource fields: hours"))
        .stdout(predicate::str::contains("Base Cost:"))
        .stdout(predicate::str::contains("$0.00"));
}

#[test]
fn test_calculate_malformed_fails() {
    estimator()
        .arg("calculate")
        .arg(test_data("malformed.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Yaml"));
}

#[test]
fn test_init_and_export() {
    let temp_dir = TempDir::new().unwrap();
    let yaml = temp_dir.path().join("rating.yaml");
    let xlsx = temp_dir.path().join("rating.xlsx");

    estimator()
        .arg("init")
        .arg(&yaml)
        .args(["--module", "rating_implementation"])
        .assert()
        .success();
    assert!(yaml.exists());

    estimator()
        .arg("export")
        .arg(&yaml)
        .arg(&xlsx)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rating Implementation Estimate"));
    assert!(xlsx.exists());
}
