use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn fixture(name: &str) -> String {
    format!("{}/../../tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn test_extracts_assignment_to_stdout() {
    let mut cmd = Command::cargo_bin("canvass").unwrap();
    cmd.arg(fixture("assignment.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Essay 2: Cell Division"))
        .stdout(predicate::str::contains("mitosis"));
}

#[test]
fn test_reads_from_stdin() {
    let html = fs::read_to_string(fixture("assignment.html")).unwrap();

    let mut cmd = Command::cargo_bin("canvass").unwrap();
    cmd.arg("-")
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("mitosis"));
}

#[test]
fn test_json_format() {
    let mut cmd = Command::cargo_bin("canvass").unwrap();
    cmd.arg(fixture("assignment.html"))
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"body\""))
        .stdout(predicate::str::contains("\"is_acceptable\": true"));
}

#[test]
fn test_source_url_tags_content_type() {
    let mut cmd = Command::cargo_bin("canvass").unwrap();
    cmd.arg(fixture("assignment.html"))
        .args(["--format", "json"])
        .args(["--source-url", "https://school.instructure.com/courses/101/assignments/5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"content_type\": \"assignment\""))
        .stdout(predicate::str::contains("\"course_id\": \"101\""));
}

#[test]
fn test_min_chars_override() {
    let mut cmd = Command::cargo_bin("canvass").unwrap();
    cmd.arg(fixture("assignment.html"))
        .args(["--min-chars", "100000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No significant content found"));
}

#[test]
fn test_rejects_unrendered_shell() {
    let mut cmd = Command::cargo_bin("canvass").unwrap();
    cmd.arg(fixture("spa_shell.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No significant content found"));
}

#[test]
fn test_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("extracted.txt");

    let mut cmd = Command::cargo_bin("canvass").unwrap();
    cmd.arg(fixture("assignment.html"))
        .args(["--output", out.to_str().unwrap()])
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("mitosis"));
}

#[test]
fn test_missing_file_fails() {
    let mut cmd = Command::cargo_bin("canvass").unwrap();
    cmd.arg("does_not_exist.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_invalid_format_rejected() {
    let mut cmd = Command::cargo_bin("canvass").unwrap();
    cmd.arg(fixture("assignment.html"))
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}
