//! The `header` command - print the header of an encoded value.

use crate::cli::HeaderArgs;
use crate::common::CliResult;
use crate::common::input::read_input;

/// Run the header command.
pub fn run(args: HeaderArgs) -> CliResult<()> {
    let bytes = read_input(&args.input)?;
    let header = ombu::header(&bytes).map_err(ombu::Error::from)?;

    println!("version:      {}", header.version);
    println!("header bytes: {}", header.header_len);
    println!("payload:      {} byte(s)", header.payload_len);
    println!("objects:      {}", header.object_count);
    println!("total:        {} byte(s)", header.total_len());
    if bytes.len() != header.total_len() {
        println!("input:        {} byte(s)", bytes.len());
    }
    Ok(())
}
