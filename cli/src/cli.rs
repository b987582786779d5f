//! Command-line interface definitions.
//!
//! This module contains only clap struct definitions - no business logic.
//! All command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Ombu - look inside encoded values
#[derive(Parser, Debug)]
#[command(name = "ombu", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tokens of an encoded value
    Inspect(InspectArgs),

    /// Print the header of an encoded value
    Header(HeaderArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where to read an encoded value from.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// File to read, or `-` for stdin
    #[arg(default_value = "-")]
    pub file: String,

    /// Read the input as hex text (whitespace is ignored)
    #[arg(long)]
    pub hex: bool,
}

/// Arguments for the `inspect` command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Maximum nesting depth to accept
    #[arg(long, default_value_t = ombu::DecodeOptions::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum number of objects to accept
    #[arg(long)]
    pub max_objects: Option<usize>,
}

/// Arguments for the `header` command.
#[derive(Args, Debug)]
pub struct HeaderArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the `completions` command.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
