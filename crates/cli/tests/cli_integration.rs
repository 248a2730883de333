//! CLI integration tests for the `translate` and `check` subcommands.
//!
//! Uses `assert_cmd` to spawn the `aralia` binary and verify exit codes,
//! stdout content, and stderr content. Fixtures come from the workspace
//! conformance/ directory; outputs go to temporary directories.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn fixture(rel: &str) -> String {
    workspace_root()
        .join("conformance")
        .join(rel)
        .display()
        .to_string()
}

/// Helper: create a Command for the `aralia` binary, rooted at workspace.
fn aralia() -> Command {
    let mut cmd = cargo_bin_cmd!("aralia");
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    aralia()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Open-PSA MEF XML"));
}

#[test]
fn version_exits_0() {
    aralia()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("aralia"));
}

#[test]
fn translate_requires_a_file() {
    aralia().arg("translate").assert().failure();
}

// ──────────────────────────────────────────────
// 2. Translate subcommand
// ──────────────────────────────────────────────

#[test]
fn translate_writes_stem_xml_into_out_dir() {
    let tmp = TempDir::new().unwrap();
    aralia()
        .args(["translate", &fixture("positive/valid_tree.txt"), "--out-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("valid_tree.xml"));

    let xml = fs::read_to_string(tmp.path().join("valid_tree.xml")).unwrap();
    assert!(xml.contains("<define-fault-tree name=\"ValidFaultTree\">"));
    assert!(xml.contains("<atleast min=\"2\">"));
    assert!(xml.contains("<define-basic-event name=\"e4\"/>"));
}

#[test]
fn translate_defaults_to_current_directory() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("pump.txt");
    fs::write(&input, "Pump\ng1 := a & b\n").unwrap();
    aralia()
        .current_dir(tmp.path())
        .args(["translate", "pump.txt"])
        .assert()
        .success();
    assert!(tmp.path().join("pump.xml").exists());
}

#[test]
fn translate_to_stdout() {
    aralia()
        .args(["translate", "--stdout", &fixture("positive/null_gate.txt")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains("<basic-event name=\"a\"/>"));
}

#[test]
fn stdout_and_out_dir_conflict() {
    aralia()
        .args([
            "translate",
            "--stdout",
            "--out-dir",
            "out",
            &fixture("positive/null_gate.txt"),
        ])
        .assert()
        .failure();
}

#[test]
fn stdout_takes_a_single_input() {
    aralia()
        .args([
            "translate",
            "--stdout",
            &fixture("positive/null_gate.txt"),
            &fixture("positive/not_gate.txt"),
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("single XML document"));
}

#[test]
fn colliding_output_names_are_rejected() {
    let tmp = TempDir::new().unwrap();
    for sub in ["a", "b"] {
        fs::create_dir_all(tmp.path().join(sub)).unwrap();
    }
    fs::write(tmp.path().join("a/x.txt"), "First\ng1 := a & b\n").unwrap();
    fs::write(tmp.path().join("b/x.txt"), "Second\ng1 := c | d\n").unwrap();
    let out = tmp.path().join("out");

    aralia()
        .current_dir(tmp.path())
        .args(["translate", "a/x.txt", "b/x.txt", "--out-dir"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("b/x.txt"))
        .stderr(predicate::str::contains("already taken by a/x.txt"));

    let xml = fs::read_to_string(out.join("x.xml")).unwrap();
    assert!(xml.contains("name=\"First\""), "{}", xml);
}

#[test]
fn default_probability_fills_undefined_events() {
    aralia()
        .args([
            "translate",
            "--stdout",
            "--default-probability",
            "0.5",
            &fixture("positive/null_gate.txt"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<float value=\"0.5\"/>"));
}

#[test]
fn default_probability_out_of_range_is_rejected() {
    aralia()
        .args([
            "translate",
            "--stdout",
            "--default-probability",
            "1.5",
            &fixture("positive/null_gate.txt"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("within [0, 1]"));
}

#[test]
fn translate_error_is_located_text() {
    aralia()
        .args(["translate", "--stdout", &fixture("negative/cycle.txt")])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "cycle.txt:4: fault tree error: cycle detected",
        ));
}

#[test]
fn translate_error_json() {
    let out = aralia()
        .args([
            "--output",
            "json",
            "translate",
            "--stdout",
            &fixture("negative/arithmetic_plus.txt"),
        ])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["kind"], "parsing");
    assert_eq!(value["line"], 2);
}

#[test]
fn one_bad_file_does_not_stop_the_batch() {
    let tmp = TempDir::new().unwrap();
    aralia()
        .args([
            "translate",
            &fixture("negative/no_name.txt"),
            &fixture("positive/orphans.txt"),
            "--out-dir",
        ])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("format error"));
    assert!(tmp.path().join("orphans.xml").exists());
    assert!(!tmp.path().join("no_name.xml").exists());
}

#[test]
fn missing_input_reports_io_error() {
    aralia()
        .args(["translate", "--stdout", "does/not/exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read does/not/exist.txt"));
}

#[test]
fn multi_top_flag_accepts_forests() {
    aralia()
        .args(["translate", "--stdout", &fixture("negative/multiple_tops.txt")])
        .assert()
        .failure();
    aralia()
        .args([
            "translate",
            "--stdout",
            "--multi-top",
            &fixture("negative/multiple_tops.txt"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<define-gate name=\"g2\">"));
}

// ──────────────────────────────────────────────
// 3. Check subcommand
// ──────────────────────────────────────────────

#[test]
fn check_prints_summary() {
    aralia()
        .args(["check", &fixture("positive/valid_tree.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "9 gates, 3 basic events, 2 house events, 1 undefined events; top: root",
        ));
}

#[test]
fn check_json_summary() {
    let out = aralia()
        .args([
            "--output",
            "json",
            "check",
            &fixture("positive/mixed_case.txt"),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value[0]["summary"]["name"], "Pumps");
    assert_eq!(value[0]["summary"]["roots"][0], "Top");
}

#[test]
fn check_quiet_is_silent_on_success() {
    aralia()
        .args(["--quiet", "check", &fixture("positive/orphans.txt")])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn verbose_logs_passes_to_stderr() {
    aralia()
        .args(["--verbose", "check", &fixture("positive/null_gate.txt")])
        .assert()
        .success()
        .stderr(predicate::str::contains("built fault tree model"));
}
