//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use expect_test::Expect;
use std::io::Write;

/// A tuple `(7i32, "hi", [1u8], <same list>)` in hex.
pub const SHARED_TUPLE_HEX: &str = "
    4f4d4255 01 15 02
    10 04
    04 07000000
    0c 02000000 6869
    12 01 06 01 13
    17 01
";

/// Create a new command for the ombu binary.
pub fn ombu() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ombu"))
}

/// Create a temporary file with the given content.
pub fn temp_file(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ombu")
        .tempfile()
        .unwrap();
    file.write_all(content).unwrap();
    file
}

/// Decode hex text, ignoring whitespace.
pub fn unhex(text: &str) -> Vec<u8> {
    let digits: String = text.split_whitespace().collect();
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).unwrap())
        .collect()
}

/// Run a command and check that stdout matches the expected output.
pub fn check_stdout(args: &[&str], stdin: Option<&str>, expected: Expect) {
    let mut cmd = ombu();
    cmd.args(args);
    if let Some(input) = stdin {
        cmd.write_stdin(input);
    }
    let output = cmd.output().expect("failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    expected.assert_eq(&stdout);
}
