//! CLI surface tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_pipeline_subcommands() {
    Command::cargo_bin("salarymap")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("salarymap")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
