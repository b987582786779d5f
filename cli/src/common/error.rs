//! Error handling utilities for the CLI.

use std::fmt::Display;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use thiserror::Error;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("input is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error(transparent)]
    Ombu(#[from] ombu::Error),
}

impl Diagnostic for CliError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match self {
            CliError::Io { .. } => Some(Box::new("ombu_cli::io")),
            CliError::Hex(_) => Some(Box::new("ombu_cli::hex")),
            CliError::Ombu(err) => Diagnostic::code(err),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match self {
            CliError::Io { .. } => None,
            CliError::Hex(_) => Some(Box::new(
                "pass raw bytes without `--hex`, or hex digits with optional whitespace",
            )),
            CliError::Ombu(err) => Diagnostic::help(err),
        }
    }
}

/// Render an error to stderr and exit with code 1.
pub fn render_and_exit(error: CliError, no_color: bool) -> ! {
    let handler = if no_color {
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
    } else {
        GraphicalReportHandler::new()
    };

    let mut out = String::new();
    if handler.render_report(&mut out, &error).is_err() {
        out = format!("error: {error}\n");
    }
    eprint!("{out}");
    std::process::exit(1);
}
