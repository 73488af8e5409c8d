//! CLI integration tests that exercise the `flashjson` binary end to end.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("flashjson").expect("binary should exist")
}

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn parse_reports_ok_on_valid_json() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "valid.json", r#"{"a":1,"b":[true,null]}"#);

    cmd().arg("parse").arg(&input).assert().success().stdout(predicate::str::contains("ok"));
}

#[test]
fn parse_reports_failure_on_malformed_json() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "broken.json", r#"{"a":}"#);

    cmd().arg("parse").arg(&input).assert().failure();
}

#[test]
fn fmt_minifies_whitespace() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "spaced.json", "{ \"a\" : 1 ,  \"b\" : 2 }");

    cmd()
        .arg("fmt")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"a":1,"b":2}"#));
}

#[test]
fn get_extracts_pointer_target() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "nested.json", r#"{"a":{"b":[10,20,30]}}"#);

    cmd()
        .arg("get")
        .arg(&input)
        .args(["--pointer", "/a/b/1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20"));
}

#[test]
fn get_fails_on_unknown_key() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "simple.json", r#"{"a":1}"#);

    cmd().arg("get").arg(&input).args(["--pointer", "/zzz"]).assert().failure();
}

#[test]
fn path_collects_wildcard_matches_into_an_array() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "items.json", r#"{"items":[{"v":1},{"v":2},{"v":3}]}"#);

    cmd()
        .arg("path")
        .arg(&input)
        .args(["--path", "$.items[*].v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1,2,3]"));
}

#[test]
fn path_returns_single_value_unwrapped() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "single.json", r#"{"a":{"b":42}}"#);

    cmd()
        .arg("path")
        .arg(&input)
        .args(["--path", "$.a.b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("42"));
}
