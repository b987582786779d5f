//! Integration tests for the `header` command.

mod common;

use common::{SHARED_TUPLE_HEX, check_stdout, ombu, temp_file, unhex};
use expect_test::expect;
use predicates::prelude::*;

#[test]
fn header_of_shared_tuple() {
    check_stdout(
        &["header", "--hex"],
        Some(SHARED_TUPLE_HEX),
        expect![[r#"
            version:      1
            header bytes: 7
            payload:      21 byte(s)
            objects:      2
            total:        28 byte(s)
        "#]],
    );
}

#[test]
fn header_ignores_payload() {
    // Only the header is read, so a truncated payload is still reported.
    let mut bytes = unhex(SHARED_TUPLE_HEX);
    bytes.truncate(10);
    let file = temp_file(&bytes);

    ombu()
        .args(["header", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("total:        28 byte(s)"))
        .stdout(predicate::str::contains("input:        10 byte(s)"));
}

#[test]
fn header_bad_magic() {
    ombu()
        .args(["--no-color", "header"])
        .write_stdin("not an ombu value")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ombu::decode::bad_header"))
        .stderr(predicate::str::contains("missing magic bytes"));
}

#[test]
fn header_empty_input() {
    ombu()
        .args(["--no-color", "header"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input is empty"));
}

#[test]
fn completions_generate() {
    ombu()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ombu"));
}
