use std::path::PathBuf;

use stringsheet::{
    DuplicateSourcePolicy, Error, Escaping, GenerateOptions, Generated, RowRange, Table, generate,
    load_identifier_table, load_translation_table, traits::Parser,
};
use tracing::{debug, info, warn};

use crate::cli::GenerateArgs;

/// Options for a generate run, built from the command line.
impl From<&GenerateArgs> for GenerateOptions {
    fn from(args: &GenerateArgs) -> Self {
        GenerateOptions {
            escaping: if args.legacy_escaping {
                Escaping::Legacy
            } else {
                Escaping::Standard
            },
            duplicates: if args.reject_duplicates {
                DuplicateSourcePolicy::Reject
            } else {
                DuplicateSourcePolicy::FirstMatch
            },
            languages: args.languages.clone(),
        }
    }
}

/// Loads both tables, generates every language and writes the files to the
/// output directory. Returns the run with the paths written.
pub fn run_generate_command(args: &GenerateArgs) -> Result<(Generated, Vec<PathBuf>), Error> {
    let identifiers = load_identifier_table(&Table::read_from(&args.identifiers)?)?;
    let translations = load_translation_table(&Table::read_from(&args.translations)?)?;
    debug!(
        identifiers = identifiers.len(),
        translation_rows = translations.rows.len(),
        languages = ?translations.languages,
        "loaded tables"
    );

    let end = match args.end {
        Some(end) => end,
        None => identifiers.len().saturating_sub(1),
    };
    let range = RowRange::new(args.start, end, identifiers.len())?;

    let generated = generate(
        args.platform,
        &identifiers,
        &translations,
        range,
        &GenerateOptions::from(args),
    )?;
    let written = generated.write_to_dir(&args.output_dir)?;
    for path in &written {
        info!(path = %path.display(), "wrote resource file");
    }

    report_warnings(&generated);
    Ok((generated, written))
}

/// Logs the aggregated warning report once, with each warning at debug level.
fn report_warnings(generated: &Generated) {
    let summary = generated.summary();
    if summary.is_empty() {
        info!("all {} records translated", generated.range.len());
        return;
    }

    for warning in &generated.warnings {
        debug!("{}", warning);
    }
    for (language, kinds) in &summary.by_language {
        let counts = kinds
            .iter()
            .map(|(kind, count)| format!("{count} {kind}"))
            .collect::<Vec<_>>()
            .join(", ");
        warn!(language = language.as_str(), "{}", counts);
    }
    warn!("{} (run with -vv to list them)", summary);
}
