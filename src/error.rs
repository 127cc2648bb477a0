//! All error types for the stringsheet crate.
//!
//! These are returned from all fallible operations (table loading, reconciliation,
//! serialization, resource parsing).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("schema error: {0}")]
    Schema(String),

    #[error("invalid row range: {0}")]
    InvalidRange(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Creates a new schema error.
    pub fn schema_error(message: impl Into<String>) -> Self {
        Error::Schema(message.into())
    }

    /// Creates a new parse error.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_schema_error() {
        let error = Error::schema_error("missing column `english_value`");
        assert_eq!(
            error.to_string(),
            "schema error: missing column `english_value`"
        );
    }

    #[test]
    fn test_invalid_range_error() {
        let error = Error::InvalidRange("start 3 is after end 1".to_string());
        assert_eq!(
            error.to_string(),
            "invalid row range: start 3 is after end 1"
        );
    }

    #[test]
    fn test_parse_error() {
        let error = Error::parse_error("unexpected end of document");
        assert_eq!(error.to_string(), "parse error: unexpected end of document");
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::from(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_unsupported_format_error() {
        let error = Error::UnsupportedFormat("xyz".to_string());
        assert_eq!(error.to_string(), "unsupported format: xyz");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Schema("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Schema"));
        assert!(debug.contains("test"));
    }
}
