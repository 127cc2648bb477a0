//! Resolves identifier rows against the translation table for one language.
//!
//! Rows are joined on exact source-text equality. A missing row or a blank cell
//! falls back to the source text and is recorded as a [`Warning`]; nothing in
//! here fails because a translation is missing.

use std::collections::HashMap;

use tracing::trace;

use crate::{
    error::Error,
    types::{
        IdentifierRow, ResolvedRecord, RowRange, TranslationRow, TranslationTable, Warning,
        WarningKind,
    },
};

/// Records and warnings for one language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciled {
    /// One record per identifier row in the range, in table order.
    pub records: Vec<ResolvedRecord>,
    pub warnings: Vec<Warning>,
}

/// Lookup from source text to the translation rows carrying it.
#[derive(Debug)]
pub struct SourceIndex<'a> {
    rows: &'a [TranslationRow],
    by_source: HashMap<&'a str, Match>,
}

#[derive(Debug, Clone, Copy)]
struct Match {
    first: usize,
    count: usize,
}

impl<'a> SourceIndex<'a> {
    pub fn new(rows: &'a [TranslationRow]) -> Self {
        let mut by_source: HashMap<&str, Match> = HashMap::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            by_source
                .entry(row.source_text.as_str())
                .and_modify(|m| m.count += 1)
                .or_insert(Match {
                    first: index,
                    count: 1,
                });
        }
        Self { rows, by_source }
    }

    /// The first row carrying `source_text`, and how many rows carry it.
    pub fn lookup(&self, source_text: &str) -> Option<(&'a TranslationRow, usize)> {
        self.by_source
            .get(source_text)
            .map(|m| (&self.rows[m.first], m.count))
    }

    /// Source texts appearing on more than one row, in table order.
    pub fn duplicates(&self) -> Vec<&'a str> {
        let mut duplicates = self
            .by_source
            .iter()
            .filter(|(_, m)| m.count > 1)
            .map(|(source, m)| (m.first, *source))
            .collect::<Vec<_>>();
        duplicates.sort_unstable();
        duplicates.into_iter().map(|(_, source)| source).collect()
    }
}

/// Reconciles `range` of `identifiers` against `translations` for `language`.
///
/// Fails only when `language` is not a column of the translation table or the
/// range does not fit the identifier rows.
pub fn reconcile(
    identifiers: &[IdentifierRow],
    translations: &TranslationTable,
    range: RowRange,
    language: &str,
) -> Result<Reconciled, Error> {
    let index = SourceIndex::new(&translations.rows);
    reconcile_with_index(identifiers, translations, &index, range, language)
}

/// Same as [`reconcile`], reusing a prebuilt [`SourceIndex`] so several
/// languages can share it.
pub fn reconcile_with_index(
    identifiers: &[IdentifierRow],
    translations: &TranslationTable,
    index: &SourceIndex<'_>,
    range: RowRange,
    language: &str,
) -> Result<Reconciled, Error> {
    let column = translations.language_index(language).ok_or_else(|| {
        Error::schema_error(format!(
            "translation table has no `{}` column",
            language
        ))
    })?;
    let rows = identifiers.get(range.start()..=range.end()).ok_or_else(|| {
        Error::InvalidRange(format!(
            "{} does not fit {} identifier rows",
            range,
            identifiers.len()
        ))
    })?;

    let mut reconciled = Reconciled {
        records: Vec::with_capacity(rows.len()),
        warnings: Vec::new(),
    };

    for row in rows {
        let warn = |kind| Warning {
            kind,
            name: row.name.clone(),
            source_text: row.source_text.clone(),
            language: language.to_string(),
        };

        let translated = match index.lookup(&row.source_text) {
            None => {
                reconciled.warnings.push(warn(WarningKind::NoTranslationFound));
                None
            }
            Some((matched, count)) => {
                if count > 1 {
                    reconciled
                        .warnings
                        .push(warn(WarningKind::AmbiguousTranslation));
                }
                match matched.cell(column) {
                    Some(cell) if !cell.trim().is_empty() => Some(cell),
                    _ => {
                        reconciled.warnings.push(warn(WarningKind::EmptyTranslation));
                        None
                    }
                }
            }
        };

        trace!(
            name = %row.name,
            language,
            fallback = translated.is_none(),
            "resolved record"
        );

        reconciled.records.push(ResolvedRecord {
            name: row.name.clone(),
            source_text: row.source_text.clone(),
            value: translated.unwrap_or(&row.source_text).to_string(),
            used_fallback: translated.is_none(),
        });
    }

    Ok(reconciled)
}
