//! The `inspect` command - list the tokens of an encoded value.

use ombu::DecodeOptions;

use crate::cli::InspectArgs;
use crate::common::CliResult;
use crate::common::input::read_input;

/// Run the inspect command.
pub fn run(args: InspectArgs) -> CliResult<()> {
    let bytes = read_input(&args.input)?;

    let mut options = DecodeOptions::default().with_max_depth(args.max_depth);
    if let Some(limit) = args.max_objects {
        options = options.with_max_objects(limit);
    }

    let dump = ombu::inspect_with(&options, &bytes).map_err(ombu::Error::from)?;
    tracing::debug!(lines = dump.lines.len(), "Inspected input");
    print!("{dump}");
    Ok(())
}
