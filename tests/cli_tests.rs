//! End-to-end CLI tests over the fixture rule files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn ruletree() -> Command {
    Command::cargo_bin("ruletree").expect("binary builds")
}

#[test]
fn format_emits_canonical_lines() {
    ruletree()
        .arg("format")
        .arg(fixture("build.rules"))
        .assert()
        .success()
        .stdout(predicate::str::contains("RULE(OUTPUTS("))
        .stdout(predicate::str::contains("NRULE(NAME(CHAR(i))"));
}

#[test]
fn show_renders_indented_trees() {
    ruletree()
        .arg("show")
        .arg(fixture("build.rules"))
        .assert()
        .success()
        .stdout(predicate::str::contains("RULE\n"))
        .stdout(predicate::str::contains("  OUTPUTS"))
        .stdout(predicate::str::contains("RANGE 'a'..'z'"));
}

#[test]
fn check_accepts_a_valid_file() {
    ruletree()
        .arg("check")
        .arg(fixture("build.rules"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 rule(s) ok"));
}

#[test]
fn check_rejects_a_misshapen_rule() {
    ruletree()
        .arg("check")
        .arg(fixture("bad.rules"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected as the child"))
        .stderr(predicate::str::contains("unexpected_child"));
}

#[test]
fn missing_file_fails_with_context() {
    ruletree()
        .arg("show")
        .arg(fixture("no-such-file.rules"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
