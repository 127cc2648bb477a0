#![forbid(unsafe_code)]
//! Generate Android and Apple string resources from spreadsheet tables, and
//! read them back.
//!
//! Two tables drive a run: the identifier table (`string_name`, `english_value`)
//! lists the strings an app needs, and the translation table (`english_value`
//! plus one column per language) holds the translations. Rows are joined on the
//! English text; a missing or blank translation falls back to the English text
//! and is reported as a warning.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringsheet::{
//!     GenerateOptions, Platform, RowRange, Table, generate, load_identifier_table,
//!     load_translation_table, traits::Parser,
//! };
//!
//! let identifiers = load_identifier_table(&Table::read_from("identifiers.csv")?)?;
//! let translations = load_translation_table(&Table::read_from("translations.csv")?)?;
//! let range = RowRange::all(identifiers.len())?;
//!
//! let generated = generate(
//!     Platform::Android,
//!     &identifiers,
//!     &translations,
//!     range,
//!     &GenerateOptions::default(),
//! )?;
//! generated.write_to_dir("out")?;
//! println!("{}", generated.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Supported Formats
//!
//! - **Android `strings.xml`**: `<resources>` with one `<string name="...">` per identifier
//! - **Apple `.strings`**: `"English" = "Translation";` lines keyed by the English text
//! - **CSV tables**: input tables with a header row, and the `string_name,value`
//!   table a resource file converts back into

pub mod error;
pub mod formats;
pub mod generate;
pub mod reconcile;
pub mod table;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::{ResourceFormat, infer_format_from_extension, write_table},
    generate::{
        Artifact, Conversion, Generated, WarningSummary, convert_str, convert_to_table, generate,
    },
    reconcile::{Reconciled, reconcile},
    table::{Table, load_identifier_table, load_translation_table},
    types::{
        DuplicateSourcePolicy, Escaping, GenerateOptions, IdentifierRow, LanguageId, LineError,
        Platform, ResolvedRecord, RowRange, TableRecord, TranslationRow, TranslationTable,
        Warning, WarningKind,
    },
};
