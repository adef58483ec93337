//! CLI integration tests for csv-to-sqlite.
//!
//! These tests verify command-line argument parsing, the end-to-end load
//! path, and exit codes for various error conditions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Get a command for the csv-to-sqlite binary.
fn cmd() -> Command {
    Command::cargo_bin("csv-to-sqlite").unwrap()
}

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--typing"))
        .stdout(predicate::str::contains("--drop-tables"))
        .stdout(predicate::str::contains("--delimiter"))
        .stdout(predicate::str::contains("--encoding"))
        .stdout(predicate::str::contains("--quote"))
        .stdout(predicate::str::contains("--batch-size"));
}

#[test]
fn test_help_shows_defaults() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[default: full]"))
        .stdout(predicate::str::contains("[default: utf-8]"))
        .stdout(predicate::str::contains("[default: 1000]"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("csv-to-sqlite"));
}

// =============================================================================
// File Collection Tests
// =============================================================================

#[test]
fn test_no_files_exits_successfully() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("No files were specified"));
}

#[test]
fn test_file_names_piped_from_stdin() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "piped.csv", "id\n1\n2\n");
    let db = dir.path().join("out.db");

    cmd()
        .args(["--output", db.to_str().unwrap()])
        .write_stdin(format!("{}\n", csv.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Written 2 rows into 1 tables"));
}

// =============================================================================
// End-to-End Load Tests
// =============================================================================

#[test]
fn test_loads_one_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "stats.csv", "id,name\n1,hp\n2,attack\n3,defense\n");
    let db = dir.path().join("out.db");

    cmd()
        .args(["--file", csv.to_str().unwrap(), "--output", db.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Written 3 rows into 1 tables"));
    assert!(db.exists());
}

#[test]
fn test_loads_multiple_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = write_csv(dir.path(), "a.csv", "id\n1\n");
    let b = write_csv(dir.path(), "b.csv", "id\n1\n2\n");
    let db = dir.path().join("out.db");

    cmd()
        .args([
            "-f",
            a.to_str().unwrap(),
            "-f",
            b.to_str().unwrap(),
            "-o",
            db.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Written 3 rows into 2 tables"));
}

#[test]
fn test_output_json_report() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "j.csv", "id\n1\n");
    let db = dir.path().join("out.db");

    cmd()
        .args([
            "-f",
            csv.to_str().unwrap(),
            "-o",
            db.to_str().unwrap(),
            "--output-json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rows_inserted\": 1"));
}

// =============================================================================
// Failure Isolation Tests
// =============================================================================

#[test]
fn test_missing_input_file_still_exits_successfully() {
    let dir = tempfile::TempDir::new().unwrap();
    let good = write_csv(dir.path(), "good.csv", "id\n1\n2\n");
    let db = dir.path().join("out.db");

    cmd()
        .args([
            "-f",
            dir.path().join("ghost.csv").to_str().unwrap(),
            "-f",
            good.to_str().unwrap(),
            "-o",
            db.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Error on table ghost"))
        .stdout(predicate::str::contains("Written 2 rows into 2 tables"));
}

// =============================================================================
// Exit Code Tests - Config Errors (Exit Code 1)
// =============================================================================

#[test]
fn test_invalid_typing_mode_exits_with_code_1() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "t.csv", "id\n1\n");

    cmd()
        .args(["-f", csv.to_str().unwrap(), "--typing", "sampled"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid typing mode"));
}

#[test]
fn test_invalid_quote_mode_exits_with_code_1() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "t.csv", "id\n1\n");

    cmd()
        .args(["-f", csv.to_str().unwrap(), "--quote", "some"])
        .assert()
        .code(1);
}

#[test]
fn test_unknown_encoding_exits_with_code_1() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "t.csv", "id\n1\n");

    cmd()
        .args(["-f", csv.to_str().unwrap(), "--encoding", "utf-9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown encoding label"));
}

#[test]
fn test_zero_batch_size_exits_with_code_1() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "t.csv", "id\n1\n");

    cmd()
        .args(["-f", csv.to_str().unwrap(), "--batch-size", "0"])
        .assert()
        .code(1);
}

// =============================================================================
// Option Behavior Tests
// =============================================================================

#[test]
fn test_drop_tables_allows_reload() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "again.csv", "id\n1\n2\n");
    let db = dir.path().join("out.db");

    cmd()
        .args(["-f", csv.to_str().unwrap(), "-o", db.to_str().unwrap()])
        .assert()
        .success();

    // Without -D the second load collides; with it, the reload succeeds.
    cmd()
        .args(["-f", csv.to_str().unwrap(), "-o", db.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Error on table again"));

    cmd()
        .args(["-f", csv.to_str().unwrap(), "-o", db.to_str().unwrap(), "-D"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Written 2 rows into 1 tables"));
}

#[test]
fn test_custom_delimiter() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "semi.csv", "id;name\n1;a\n");
    let db = dir.path().join("out.db");

    cmd()
        .args([
            "-f",
            csv.to_str().unwrap(),
            "-o",
            db.to_str().unwrap(),
            "--delimiter",
            ";",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Written 1 rows into 1 tables"));
}
