//! Integration tests driving the `snow` binary itself via
//! `assert_cmd`/`predicates`/`tempfile`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const MINIMAL_SOURCE: &str = "externals (stem) routines (stem) define stem as (true)";

#[test]
fn compiles_stdin_to_stdout() {
    Command::cargo_bin("snow")
        .unwrap()
        .write_stdin(MINIMAL_SOURCE)
        .assert()
        .success()
        .stdout(predicate::str::contains("pub fn stem(input: &str) -> String"));
}

#[test]
fn compiles_infile_to_outfile() {
    let dir = tempdir().unwrap();
    let infile = dir.path().join("stem.sbl");
    let outfile = dir.path().join("stem.rs");
    fs::write(&infile, MINIMAL_SOURCE).unwrap();

    Command::cargo_bin("snow")
        .unwrap()
        .arg(&infile)
        .arg(&outfile)
        .assert()
        .success();

    let generated = fs::read_to_string(&outfile).unwrap();
    assert!(generated.contains("pub fn stem(input: &str) -> String"));
}

#[test]
fn debug_flag_changes_the_external_signature() {
    Command::cargo_bin("snow")
        .unwrap()
        .arg("--debug")
        .write_stdin(MINIMAL_SOURCE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pub fn stem(input: &str) -> (String, Program)",
        ));
}

#[test]
fn parse_error_exits_nonzero_with_a_stderr_diagnostic() {
    Command::cargo_bin("snow")
        .unwrap()
        .write_stdin("routines (r) define r as (nope)")
        .assert()
        .failure()
        .stderr(predicate::str::contains("compiling Snowball source"));
}

#[test]
fn missing_infile_is_reported_and_leaves_no_output() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.sbl");
    let outfile = dir.path().join("out.rs");

    Command::cargo_bin("snow")
        .unwrap()
        .arg(&missing)
        .arg(&outfile)
        .assert()
        .failure();

    assert!(!outfile.exists());
}

#[test]
fn config_file_forces_debug_mode_by_default() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("snow.toml");
    fs::write(&config_path, "debug = true\n").unwrap();

    Command::cargo_bin("snow")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .write_stdin(MINIMAL_SOURCE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pub fn stem(input: &str) -> (String, Program)",
        ));
}
