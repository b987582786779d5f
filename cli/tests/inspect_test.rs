//! Integration tests for the `inspect` command.

mod common;

use common::{SHARED_TUPLE_HEX, check_stdout, ombu, temp_file, unhex};
use expect_test::expect;
use predicates::prelude::*;

#[test]
fn inspect_hex_from_stdin() {
    check_stdout(
        &["inspect", "--hex", "-"],
        Some(SHARED_TUPLE_HEX),
        expect![[r#"
            ombu v1: 21 payload byte(s), 2 object(s)
            0007  tuple #0 len 4
            0009    i32 7
            000e    str "hi"
            0015    list #1 len 1
            0017      u8 1
            0019      nil
            001a    ref #1
        "#]],
    );
}

#[test]
fn inspect_binary_file() {
    let file = temp_file(&unhex(SHARED_TUPLE_HEX));

    ombu()
        .args(["inspect", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("list #1 len 1"))
        .stdout(predicate::str::contains("ref #1"));
}

#[test]
fn inspect_unit() {
    check_stdout(
        &["inspect", "--hex"],
        Some("4f4d4255 01 01 00 00"),
        expect![[r#"
            ombu v1: 1 payload byte(s), 0 object(s)
            0007  unit
        "#]],
    );
}

#[test]
fn inspect_truncated_input() {
    ombu()
        .args(["--no-color", "inspect", "--hex", "-"])
        .write_stdin("4f4d4255 01 15 02 10 04")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ombu::decode::unexpected_end"))
        .stderr(predicate::str::contains("unexpected end of input"));
}

#[test]
fn inspect_respects_max_depth() {
    ombu()
        .args(["--no-color", "inspect", "--hex", "--max-depth", "1"])
        .write_stdin("4f4d4255 01 05 02 10 01 10 01 00")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ombu::decode::depth_exceeded"));
}

#[test]
fn inspect_respects_max_objects() {
    ombu()
        .args(["--no-color", "inspect", "--hex", "--max-objects", "1"])
        .write_stdin("4f4d4255 01 05 02 10 01 10 01 00")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ombu::decode::object_limit"));
}

#[test]
fn inspect_rejects_bad_hex() {
    ombu()
        .args(["--no-color", "inspect", "--hex"])
        .write_stdin("4f4d42zz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid hex"));
}

#[test]
fn inspect_missing_file() {
    ombu()
        .args(["--no-color", "inspect", "/nonexistent/value.ombu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/value.ombu"));
}
