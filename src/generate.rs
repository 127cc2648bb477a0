//! The two operations a front end drives: [`generate`] resource files from the
//! loaded tables, and [`convert_to_table`] an existing resource file back into
//! `string_name,value` rows.
//!
//! Both are pure functions of their arguments. Nothing is cached between calls,
//! so concurrent runs on separate inputs never interact.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    error::Error,
    formats::{AndroidStringsFormat, ResourceFormat, StringsFormat, infer_format_from_extension},
    reconcile::{SourceIndex, reconcile_with_index},
    traits::Parser,
    types::{
        DuplicateSourcePolicy, Escaping, GenerateOptions, IdentifierRow, LanguageId, LineError,
        Platform, ResolvedRecord, RowRange, TableRecord, TranslationTable, Warning, WarningKind,
    },
};

/// The generated resource file for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub language: LanguageId,
    /// Suggested file name, see [`Platform::file_name`].
    pub file_name: String,
    pub text: String,
    /// How many records fell back to the source text.
    pub fallback_count: usize,
}

/// Everything a generate run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub platform: Platform,
    pub range: RowRange,
    /// One artifact per language, in translation table column order.
    pub artifacts: Vec<Artifact>,
    /// Warnings of every language, grouped by language in column order.
    pub warnings: Vec<Warning>,
}

impl Generated {
    /// The generated text for `language`.
    pub fn get(&self, language: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|a| a.language == language)
            .map(|a| a.text.as_str())
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|a| a.language.as_str())
    }

    pub fn summary(&self) -> WarningSummary {
        WarningSummary::from_warnings(&self.warnings)
    }

    /// Writes every artifact into `dir` under its file name, creating `dir` if
    /// needed. Returns the written paths in artifact order.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>, Error> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.artifacts.len());
        for artifact in &self.artifacts {
            let path = dir.join(&artifact.file_name);
            fs::write(&path, artifact.text.as_bytes())?;
            debug!(path = %path.display(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

/// Warning counts of one run, for reporting once instead of once per row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WarningSummary {
    pub total: usize,
    pub by_kind: BTreeMap<WarningKind, usize>,
    pub by_language: BTreeMap<LanguageId, BTreeMap<WarningKind, usize>>,
}

impl WarningSummary {
    pub fn from_warnings(warnings: &[Warning]) -> Self {
        let mut summary = WarningSummary::default();
        for warning in warnings {
            summary.total += 1;
            *summary.by_kind.entry(warning.kind).or_insert(0) += 1;
            *summary
                .by_language
                .entry(warning.language.clone())
                .or_default()
                .entry(warning.kind)
                .or_insert(0) += 1;
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

impl Display for WarningSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "no warnings");
        }
        let kinds = self
            .by_kind
            .iter()
            .map(|(kind, count)| format!("{} {}", count, kind))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{} warning{} ({})",
            self.total,
            if self.total == 1 { "" } else { "s" },
            kinds
        )
    }
}

/// Reconciles `range` of `identifiers` against every requested language of
/// `translations` and renders one resource file per language.
///
/// Fails before producing anything when a requested language is not a column,
/// or when `options.duplicates` is [`DuplicateSourcePolicy::Reject`] and a
/// source text appears on several translation rows. Missing translations never
/// fail the run; they come back as [`Generated::warnings`].
///
/// # Example
///
/// ```rust
/// use stringsheet::{
///     GenerateOptions, Platform, RowRange, Table, generate, load_identifier_table,
///     load_translation_table, traits::Parser,
/// };
///
/// let identifiers = Table::from_str("string_name,english_value\nok,Hello\n")?;
/// let translations = Table::from_str("english_value,fr\nHello,Bonjour\n")?;
/// let identifiers = load_identifier_table(&identifiers)?;
/// let translations = load_translation_table(&translations)?;
///
/// let generated = generate(
///     Platform::Android,
///     &identifiers,
///     &translations,
///     RowRange::all(identifiers.len())?,
///     &GenerateOptions::default(),
/// )?;
/// assert_eq!(
///     generated.get("fr"),
///     Some("<resources>\n    <string name=\"ok\">Bonjour</string>\n</resources>")
/// );
/// # Ok::<(), stringsheet::Error>(())
/// ```
pub fn generate(
    platform: Platform,
    identifiers: &[IdentifierRow],
    translations: &TranslationTable,
    range: RowRange,
    options: &GenerateOptions,
) -> Result<Generated, Error> {
    let index = SourceIndex::new(&translations.rows);

    if options.duplicates == DuplicateSourcePolicy::Reject {
        let duplicates = index.duplicates();
        if !duplicates.is_empty() {
            return Err(Error::schema_error(format!(
                "translation table repeats source text {}",
                duplicates
                    .iter()
                    .map(|s| format!("{:?}", s))
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
    }

    let languages = select_languages(translations, &options.languages)?;

    let artifacts = languages
        .par_iter()
        .map(|language| -> Result<(Artifact, Vec<Warning>), Error> {
            let reconciled =
                reconcile_with_index(identifiers, translations, &index, range, language)?;
            let text = render(platform, &reconciled.records, options.escaping)?;
            let fallback_count = reconciled
                .records
                .iter()
                .filter(|r| r.used_fallback)
                .count();
            debug!(
                language = language.as_str(),
                records = reconciled.records.len(),
                fallback_count,
                "rendered {}",
                platform
            );
            Ok((
                Artifact {
                    language: language.clone(),
                    file_name: platform.file_name(language),
                    text,
                    fallback_count,
                },
                reconciled.warnings,
            ))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let (artifacts, warnings): (Vec<_>, Vec<_>) = artifacts.into_iter().unzip();
    let generated = Generated {
        platform,
        range,
        artifacts,
        warnings: warnings.into_iter().flatten().collect(),
    };

    info!(
        %platform,
        %range,
        languages = generated.artifacts.len(),
        warnings = generated.warnings.len(),
        "generated resources"
    );
    Ok(generated)
}

/// Renders one language's records in the platform's format.
pub fn render(
    platform: Platform,
    records: &[ResolvedRecord],
    escaping: Escaping,
) -> Result<String, Error> {
    match platform {
        Platform::Android => AndroidStringsFormat::from_records(records, escaping).to_text(),
        Platform::Ios => StringsFormat::from_records(records, escaping).to_text(),
    }
}

fn select_languages(
    translations: &TranslationTable,
    requested: &[LanguageId],
) -> Result<Vec<LanguageId>, Error> {
    if requested.is_empty() {
        return Ok(translations.languages.clone());
    }
    if let Some(unknown) = requested
        .iter()
        .find(|l| translations.language_index(l).is_none())
    {
        return Err(Error::schema_error(format!(
            "translation table has no `{}` column (available: {})",
            unknown,
            translations.languages.join(", ")
        )));
    }
    Ok(translations
        .languages
        .iter()
        .filter(|l| requested.contains(l))
        .cloned()
        .collect())
}

/// Rows read back from a resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub format: ResourceFormat,
    /// Rows in file order.
    pub records: Vec<TableRecord>,
    /// Malformed `.strings` lines that were skipped. Always empty for XML.
    pub line_errors: Vec<LineError>,
}

impl Conversion {
    pub fn is_complete(&self) -> bool {
        self.line_errors.is_empty()
    }
}

/// Reads the resource file at `path` into table rows.
///
/// The format is inferred from the extension when `format` is `None`. An XML
/// file that is not well-formed fails with an error; a `.strings` file always
/// converts, with its malformed lines listed in [`Conversion::line_errors`].
pub fn convert_to_table<P: AsRef<Path>>(
    path: P,
    format: Option<ResourceFormat>,
) -> Result<Conversion, Error> {
    let path = path.as_ref();
    let format = match format.or_else(|| infer_format_from_extension(path)) {
        Some(format) => format,
        None => {
            return Err(Error::UnsupportedFormat(format!(
                "cannot infer resource format from extension: {:?}",
                path.extension()
            )));
        }
    };

    let conversion = match format {
        ResourceFormat::AndroidStrings => from_android(AndroidStringsFormat::read_from(path)?),
        ResourceFormat::Strings => from_strings(StringsFormat::read_from(path)?),
    };
    debug!(
        path = %path.display(),
        records = conversion.records.len(),
        line_errors = conversion.line_errors.len(),
        "converted resource file"
    );
    Ok(conversion)
}

/// Same as [`convert_to_table`] for content already in memory.
pub fn convert_str(content: &str, format: ResourceFormat) -> Result<Conversion, Error> {
    Ok(match format {
        ResourceFormat::AndroidStrings => from_android(AndroidStringsFormat::from_str(content)?),
        ResourceFormat::Strings => from_strings(StringsFormat::from_str(content)?),
    })
}

fn from_android(format: AndroidStringsFormat) -> Conversion {
    Conversion {
        format: ResourceFormat::AndroidStrings,
        records: format.into_records(),
        line_errors: Vec::new(),
    }
}

fn from_strings(format: StringsFormat) -> Conversion {
    let (records, line_errors) = format.into_records();
    Conversion {
        format: ResourceFormat::Strings,
        records,
        line_errors,
    }
}
