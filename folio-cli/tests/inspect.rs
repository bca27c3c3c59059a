use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn manuscript(source: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.txt");
    fs::write(&path, source).unwrap();
    (dir, path)
}

#[test]
fn inspect_defaults_to_document_json() {
    let (_dir, path) = manuscript("T\nA\n+卷\n正文。\n");

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("inspect").arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"section\""))
        .stdout(predicate::str::contains("\"type\": \"paragraph\""));
}

#[test]
fn inspect_events() {
    let (_dir, path) = manuscript("T\nA\n---\na|b\n---\n");

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("inspect").arg(&path).arg("events");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("start-table columns=2\ntable-row a | b\nend-table\n"));
}

#[test]
fn inspect_normalized_does_not_write_files() {
    let (dir, path) = manuscript("T\n\nA\n一\n二。\n");

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("inspect").arg(&path).arg("normalized");
    cmd.assert().success().stdout("T\nA\n一二。\n");

    assert!(!dir.path().join("book.new.txt").exists());
}

#[test]
fn inspect_rejects_unknown_view() {
    let (_dir, path) = manuscript("T\nA\n");

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("inspect").arg(&path).arg("ast-tag");
    cmd.assert().failure();
}

#[test]
fn inspect_reports_structural_errors() {
    let (_dir, path) = manuscript("T\nA\n+++++++++太深\n");

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("inspect").arg(&path).arg("events");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown heading depth 9"));
}

#[test]
fn list_transforms() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("inspect").arg("--list-transforms");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("document-json"))
        .stdout(predicate::str::contains("normalized"));
}
