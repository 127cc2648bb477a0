use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use stringsheet::{Conversion, Error, convert_to_table, write_table};
use tracing::{info, warn};

use crate::cli::ConvertArgs;

/// Converts the input resource file and writes the `string_name,value` table
/// to the output file, or stdout when none is given.
///
/// Malformed `.strings` lines are logged one by one; the rows that did parse
/// are still written. Callers decide the exit code from
/// [`Conversion::is_complete`].
pub fn run_convert_command(args: &ConvertArgs) -> Result<Conversion, Error> {
    let conversion = convert_to_table(&args.input, args.format)?;

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_table(&conversion.records, &mut writer)?;
            writer.flush()?;
            info!(
                path = %path.display(),
                rows = conversion.records.len(),
                "wrote table"
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_table(&conversion.records, &mut writer)?;
            writer.flush()?;
        }
    }

    for error in &conversion.line_errors {
        warn!(
            line = error.line,
            content = error.content.as_str(),
            "skipped malformed line: {}",
            error.reason
        );
    }
    if !conversion.is_complete() {
        warn!(
            "{} of {} entries could not be read from {}",
            conversion.line_errors.len(),
            conversion.line_errors.len() + conversion.records.len(),
            args.input.display()
        );
    }

    Ok(conversion)
}
