//! Ombu CLI - look inside encoded values.

use clap::Parser;
use ombu_cli::cli::{Cli, Command};
use ombu_cli::{commands, common};

fn main() {
    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Inspect(args) => commands::inspect::run(args),
        Command::Header(args) => commands::header::run(args),
        Command::Completions(args) => {
            commands::completions::run(args);
            Ok(())
        }
    };

    if let Err(e) = result {
        common::error::render_and_exit(e, cli.no_color);
    }
}
