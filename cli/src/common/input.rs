//! File input utilities.

use std::io::Read;

use crate::cli::InputArgs;
use crate::common::CliError;

/// Read the encoded bytes from a file path, or stdin if the path is "-".
pub fn read_input(args: &InputArgs) -> Result<Vec<u8>, CliError> {
    let io_error = |source| CliError::Io {
        path: display_name(&args.file).to_string(),
        source,
    };

    let mut bytes = Vec::new();
    if is_stdin(&args.file) {
        std::io::stdin().read_to_end(&mut bytes).map_err(io_error)?;
    } else {
        bytes = std::fs::read(&args.file).map_err(io_error)?;
    }

    if args.hex {
        return decode_hex(&bytes);
    }
    Ok(bytes)
}

/// Decode hex text, ignoring ASCII whitespace.
pub fn decode_hex(text: &[u8]) -> Result<Vec<u8>, CliError> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(hex::decode(digits)?)
}

/// Check if the path represents stdin.
pub fn is_stdin(path: &str) -> bool {
    path == "-"
}

fn display_name(path: &str) -> &str {
    if is_stdin(path) { "<stdin>" } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_ignores_whitespace() {
        assert_eq!(
            decode_hex(b"4f 4d\n42 55\t01").unwrap(),
            b"OMBU\x01".to_vec()
        );
        assert!(matches!(decode_hex(b"4f4"), Err(CliError::Hex(_))));
        assert!(matches!(decode_hex(b"zz"), Err(CliError::Hex(_))));
    }
}
