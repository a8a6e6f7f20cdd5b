//! Integration tests for the account-ledger CLI.
//!
//! These tests run the actual binary and verify output against expected CSV files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given script and return stdout
fn run_ledger(script: &str) -> String {
    let mut cmd = Command::cargo_bin("account-ledger").unwrap();
    let assert = cmd.arg(script).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Normalize CSV for comparison (trim whitespace, drop blank lines)
fn normalize_csv(csv: &str) -> Vec<String> {
    csv.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn assert_matches_expected(script: &str, expected: &str) {
    let output = run_ledger(&test_data_path(script));
    let expected = fs::read_to_string(test_data_path(expected)).unwrap();

    assert_eq!(normalize_csv(&output), normalize_csv(&expected));
}

#[test]
fn test_script_a_deposit_transfer_withdraw() {
    assert_matches_expected("script_a.csv", "expected_a.csv");
}

#[test]
fn test_script_b_rejected_commands_are_skipped() {
    assert_matches_expected("script_b_rejections.csv", "expected_b.csv");
}

#[test]
fn test_script_c_whitespace_handling() {
    assert_matches_expected("script_c_whitespace.csv", "expected_c.csv");
}

#[test]
fn test_statements_flag() {
    let mut cmd = Command::cargo_bin("account-ledger").unwrap();
    cmd.arg(test_data_path("script_a.csv"))
        .arg("--statements")
        .assert()
        .success()
        .stdout(predicate::str::contains("Statement for account ACC0001 (Anna):"))
        .stdout(predicate::str::contains("Current balance: 500.00"))
        .stdout(predicate::str::contains("Transfer to account ACC0002: -500.00"))
        .stdout(predicate::str::contains("Transfer from account ACC0001: +500.00"));
}

#[test]
fn test_rejections_are_logged_as_warnings() {
    let mut cmd = Command::cargo_bin("account-ledger").unwrap();
    cmd.env("RUST_LOG", "warn")
        .arg(test_data_path("script_a.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Row 6"))
        .stderr(predicate::str::contains("Insufficient funds"));
}

#[test]
fn test_empty_script_prints_header_only() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "command,account,target,amount").unwrap();

    let output = run_ledger(script.path().to_str().unwrap());

    assert_eq!(normalize_csv(&output), vec!["id,owner,balance,operations"]);
}

#[test]
fn test_amounts_have_two_decimal_places() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "command,account,target,amount").unwrap();
    writeln!(script, "open,Vera,,").unwrap();
    writeln!(script, "deposit,ACC0001,,3").unwrap();
    writeln!(script, "deposit,ACC0001,,0.1").unwrap();
    writeln!(script, "deposit,ACC0001,,0.2").unwrap();

    let output = run_ledger(script.path().to_str().unwrap());

    assert!(output.contains("ACC0001,Vera,3.30,3"));
}

#[test]
fn test_sub_cent_amounts_are_skipped() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "command,account,target,amount").unwrap();
    writeln!(script, "open,Vera,,").unwrap();
    writeln!(script, "deposit,ACC0001,,100").unwrap();
    writeln!(script, "withdraw,ACC0001,,100.004").unwrap();
    writeln!(script, "deposit,ACC0001,,0.005").unwrap();

    let output = run_ledger(script.path().to_str().unwrap());

    assert!(output.contains("ACC0001,Vera,100.00,1"));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("account-ledger").unwrap();
    cmd.arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("account-ledger").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing script file"));
}
