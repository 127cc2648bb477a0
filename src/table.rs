//! The row store: raw tables and their validated record views.
//!
//! A [`Table`] is what a spreadsheet export looks like on disk, a header row
//! followed by data rows of text cells. [`load_identifier_table`] and
//! [`load_translation_table`] check the header and turn the rows into
//! [`IdentifierRow`]s and [`TranslationRow`]s, leaving the table untouched.

use std::{
    collections::HashSet,
    io::{BufRead, Write},
    path::Path,
};

use calamine::{Reader, open_workbook_auto};
use tracing::debug;

use crate::{
    error::Error,
    traits::{Parser, read_decoded},
    types::{IdentifierRow, TranslationRow, TranslationTable},
};

/// Headers accepted for the identifier column.
pub const NAME_COLUMNS: &[&str] = &["string_name", "name", "key", "id"];

/// Headers accepted for the source-text column.
pub const SOURCE_COLUMNS: &[&str] = &["english_value", "source_text", "source", "english"];

/// Workbook extensions read through `calamine` instead of the CSV reader.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A header row plus data rows of text cells.
///
/// Rows may be shorter than the header; a missing cell reads as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parses delimited text whose first record is the header.
    pub fn from_reader_with_delimiter<R: BufRead>(reader: R, delimiter: u8) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        Self::from_records(rdr.records().map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .map_err(Error::from)
        }))
    }

    /// Reads the first worksheet of an Excel or OpenDocument workbook; its
    /// first row is the header. Numbers are written the way they display
    /// (`1`, not `1.0`) and empty cells read as empty strings.
    pub fn from_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook.worksheet_range_at(0).ok_or_else(|| {
            Error::schema_error(format!("workbook {} has no worksheet", path.display()))
        })??;

        Self::from_records(
            range
                .rows()
                .map(|row| Ok(row.iter().map(|cell| cell.to_string()).collect())),
        )
    }

    fn from_records<I>(records: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Result<Vec<String>, Error>>,
    {
        let mut records = records.into_iter();
        let headers = match records.next() {
            Some(header) => header?,
            None => {
                return Err(Error::schema_error(
                    "table is empty, expected a header row",
                ));
            }
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            // Spreadsheet exports carry trailing rows with nothing in them.
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(record);
        }

        Ok(Self { headers, rows })
    }

    /// Index of the first header matching one of `aliases`, ignoring case and
    /// surrounding whitespace.
    pub fn find_column(&self, aliases: &[&str]) -> Option<usize> {
        self.headers.iter().position(|header| {
            let header = header.trim();
            aliases.iter().any(|alias| header.eq_ignore_ascii_case(alias))
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    fn describe_headers(&self) -> String {
        self.headers
            .iter()
            .map(|h| format!("`{}`", h))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Parser for Table {
    /// Parse comma-separated text.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        Self::from_reader_with_delimiter(reader, b',')
    }

    /// Parse a table file by extension: a workbook (see
    /// [`SPREADSHEET_EXTENSIONS`]), `.tsv`, or comma-separated text otherwise.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        let delimiter = match extension.as_deref() {
            Some(ext) if SPREADSHEET_EXTENSIONS.contains(&ext) => {
                return Self::from_spreadsheet(path);
            }
            Some("tsv") => b'\t',
            _ => b',',
        };

        let decoded = read_decoded(path)?;
        Self::from_reader_with_delimiter(decoded.as_bytes(), delimiter)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Reads the identifier table into ordered [`IdentifierRow`]s.
///
/// Requires a `string_name` column and an `english_value` column (or one of
/// their aliases, see [`NAME_COLUMNS`] and [`SOURCE_COLUMNS`]). Identifier names
/// are trimmed; source text is kept exactly as written since it is the join key.
pub fn load_identifier_table(table: &Table) -> Result<Vec<IdentifierRow>, Error> {
    let name_column = table.find_column(NAME_COLUMNS).ok_or_else(|| {
        Error::schema_error(format!(
            "identifier table has no `string_name` column (found {})",
            table.describe_headers()
        ))
    })?;
    let source_column = table.find_column(SOURCE_COLUMNS).ok_or_else(|| {
        Error::schema_error(format!(
            "identifier table has no `english_value` column (found {})",
            table.describe_headers()
        ))
    })?;

    let mut rows = Vec::with_capacity(table.len());
    for index in 0..table.len() {
        let name = table.cell(index, name_column).unwrap_or_default().trim();
        if name.is_empty() {
            return Err(Error::schema_error(format!(
                "identifier row {} has an empty `{}`",
                index, table.headers[name_column]
            )));
        }
        let source_text = table.cell(index, source_column).unwrap_or_default();
        if source_text.trim().is_empty() {
            return Err(Error::schema_error(format!(
                "identifier row {} (`{}`) has an empty `{}`",
                index, name, table.headers[source_column]
            )));
        }
        rows.push(IdentifierRow {
            name: name.to_string(),
            source_text: source_text.to_string(),
        });
    }

    debug!(rows = rows.len(), "loaded identifier table");
    Ok(rows)
}

/// Reads the translation table into its language list and ordered
/// [`TranslationRow`]s.
///
/// Every column other than the source-text column is a language, in header
/// order. Rows with a blank source text cannot be joined and are dropped.
pub fn load_translation_table(table: &Table) -> Result<TranslationTable, Error> {
    let source_column = table.find_column(SOURCE_COLUMNS).ok_or_else(|| {
        Error::schema_error(format!(
            "translation table has no `english_value` column (found {})",
            table.describe_headers()
        ))
    })?;

    let mut languages = Vec::new();
    let mut language_columns = Vec::new();
    let mut seen = HashSet::new();
    for (column, header) in table.headers.iter().enumerate() {
        if column == source_column {
            continue;
        }
        let language = header.trim();
        if language.is_empty() {
            return Err(Error::schema_error(format!(
                "translation table column {} has no language header",
                column
            )));
        }
        if !seen.insert(language) {
            return Err(Error::schema_error(format!(
                "translation table has more than one `{}` column",
                language
            )));
        }
        languages.push(language.to_string());
        language_columns.push(column);
    }
    if languages.is_empty() {
        return Err(Error::schema_error(
            "translation table has no language columns",
        ));
    }

    let mut rows = Vec::with_capacity(table.len());
    for index in 0..table.len() {
        let source_text = table.cell(index, source_column).unwrap_or_default();
        if source_text.trim().is_empty() {
            continue;
        }
        rows.push(TranslationRow {
            source_text: source_text.to_string(),
            translations: language_columns
                .iter()
                .map(|&column| table.cell(index, column).map(str::to_string))
                .collect(),
        });
    }

    debug!(
        rows = rows.len(),
        languages = languages.len(),
        "loaded translation table"
    );
    Ok(TranslationTable { languages, rows })
}
