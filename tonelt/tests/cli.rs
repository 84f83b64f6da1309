//! End-to-end tests against the compiled `tonelt` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_tonel(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn valid_file_exits_zero() {
    let file = write_tonel("Class { #name : #C }\nC >> value [ ^ 1 ]\n");
    Command::cargo_bin("tonelt")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn broken_body_exits_one() {
    let file = write_tonel("Class { #name : #C }\nC >> bad [ | self | self := 1 ]\n");
    Command::cargo_bin("tonelt")
        .unwrap()
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ReservedIdentifier: self"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn without_method_body_skips_body_validation() {
    let file = write_tonel("Class { #name : #C }\nC >> bad [ | self | self := 1 ]\n");
    Command::cargo_bin("tonelt")
        .unwrap()
        .arg("--without-method-body")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn missing_file_exits_one() {
    Command::cargo_bin("tonelt")
        .unwrap()
        .arg("/nonexistent/path/x.tonel")
        .assert()
        .code(1);
}

#[test]
fn bad_flag_exits_two() {
    Command::cargo_bin("tonelt")
        .unwrap()
        .arg("--not-a-real-flag")
        .assert()
        .code(2);
}

#[test]
fn version_flag_prints_version() {
    Command::cargo_bin("tonelt")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_flag_mentions_without_method_body() {
    Command::cargo_bin("tonelt")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--without-method-body"));
}
