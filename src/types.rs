//! Core types shared by the row store, the reconciler and the resource formats.
//! Everything here lives for a single generate or convert run.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A language column of the translation table (e.g. "fr", "de", "zh-Hans").
pub type LanguageId = String;

/// One row of the identifier table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentifierRow {
    /// Resource identifier (`string_name`). Never empty.
    pub name: String,

    /// Source-language text, the join key into the translation table.
    pub source_text: String,
}

/// One row of the translation table.
///
/// `translations` is aligned with [`TranslationTable::languages`]:
/// `translations[i]` is the cell for `languages[i]`, `None` when the row was too
/// short to carry that cell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationRow {
    pub source_text: String,
    pub translations: Vec<Option<String>>,
}

impl TranslationRow {
    /// The raw cell for the language at `index`, if present.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.translations.get(index).and_then(|c| c.as_deref())
    }
}

/// The translation table: its language columns and rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TranslationTable {
    /// Language columns in header order.
    pub languages: Vec<LanguageId>,
    pub rows: Vec<TranslationRow>,
}

impl TranslationTable {
    /// Position of `language` in [`TranslationTable::languages`].
    pub fn language_index(&self, language: &str) -> Option<usize> {
        self.languages.iter().position(|l| l == language)
    }
}

/// The outcome of reconciling one identifier row against one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolvedRecord {
    pub name: String,
    pub source_text: String,
    /// The value to emit. Equal to `source_text` when `used_fallback` is set.
    pub value: String,
    pub used_fallback: bool,
}

/// Inclusive slice of identifier rows to process.
///
/// Always satisfies `start <= end < identifier_count`; the only way to build one
/// is through [`RowRange::new`] or [`RowRange::all`], which check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowRange {
    start: usize,
    end: usize,
}

impl RowRange {
    /// Creates a range over `start..=end` for a table of `count` identifier rows.
    pub fn new(start: usize, end: usize, count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::InvalidRange(
                "the identifier table has no rows".to_string(),
            ));
        }
        if start > end {
            return Err(Error::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        if end >= count {
            return Err(Error::InvalidRange(format!(
                "end {} is past the last row {}",
                end,
                count - 1
            )));
        }
        Ok(Self { start, end })
    }

    /// The range covering every row of a table of `count` rows.
    pub fn all(count: usize) -> Result<Self, Error> {
        Self::new(0, count.saturating_sub(1), count)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of rows covered (never zero).
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Display for RowRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Why a record needed attention during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// No translation row carries the identifier's source text.
    NoTranslationFound,

    /// A translation row matched but the language cell is blank or absent.
    EmptyTranslation,

    /// Several translation rows share the source text; the first one was used.
    AmbiguousTranslation,
}

impl Display for WarningKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::NoTranslationFound => write!(f, "no translation found"),
            WarningKind::EmptyTranslation => write!(f, "empty translation"),
            WarningKind::AmbiguousTranslation => write!(f, "ambiguous translation"),
        }
    }
}

/// A non-fatal reconciliation issue for one identifier and one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub name: String,
    pub source_text: String,
    pub language: LanguageId,
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} for `{}` ({:?}) in {}",
            self.kind, self.name, self.source_text, self.language
        )
    }
}

/// One row of the round-trip table produced from a resource file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TableRecord {
    #[serde(rename = "string_name")]
    pub name: String,
    pub value: String,
}

impl TableRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A line of a `.strings` file that could not be read as a key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    pub content: String,
    pub reason: String,
}

impl Display for LineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line, self.reason, self.content)
    }
}

/// Target platform of a generate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// File name of the artifact generated for `language`.
    pub fn file_name(&self, language: &str) -> String {
        match self {
            Platform::Android => format!("strings_{}.xml", language),
            Platform::Ios => format!("{}.strings", language),
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" | "xml" => Ok(Platform::Android),
            "ios" | "apple" | "strings" => Ok(Platform::Ios),
            _ => Err(Error::UnsupportedFormat(format!(
                "unknown platform `{}`, expected android or ios",
                s
            ))),
        }
    }
}

/// How values are written into resource files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escaping {
    /// Escape XML reserved characters (Android) and double quotes (iOS).
    #[default]
    Standard,

    /// Insert text raw, byte-compatible with files produced by the legacy generator.
    /// Values containing `<`, `&` or `"` produce broken output in this mode.
    Legacy,
}

/// What to do when the translation table holds the same source text more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateSourcePolicy {
    /// Use the first row in table order and report `AmbiguousTranslation`.
    #[default]
    FirstMatch,

    /// Fail the run with a schema error.
    Reject,
}

/// Options of a generate run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub escaping: Escaping,
    pub duplicates: DuplicateSourcePolicy,
    /// Restrict output to these languages. Empty means every language column.
    pub languages: Vec<LanguageId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_range_single_row() {
        let range = RowRange::new(0, 0, 5).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.start(), 0);
        assert_eq!(range.end(), 0);
    }

    #[test]
    fn test_row_range_rejects_start_after_end() {
        let err = RowRange::new(3, 1, 5).unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
    }

    #[test]
    fn test_row_range_rejects_end_past_table() {
        assert!(RowRange::new(0, 5, 5).is_err());
        assert!(RowRange::new(0, 4, 5).is_ok());
    }

    #[test]
    fn test_row_range_all_on_empty_table() {
        assert!(matches!(
            RowRange::all(0).unwrap_err(),
            Error::InvalidRange(_)
        ));
        assert_eq!(RowRange::all(3).unwrap().len(), 3);
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("Android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("ios".parse::<Platform>().unwrap(), Platform::Ios);
        assert!("web".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_file_name() {
        assert_eq!(Platform::Android.file_name("fr"), "strings_fr.xml");
        assert_eq!(Platform::Ios.file_name("fr"), "fr.strings");
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning {
            kind: WarningKind::EmptyTranslation,
            name: "missing".to_string(),
            source_text: "Bye".to_string(),
            language: "fr".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "empty translation for `missing` (\"Bye\") in fr"
        );
    }
}
