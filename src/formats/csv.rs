//! The round-trip table: `string_name,value` rows exported from a resource file.
use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::TableRecord};

impl Parser for Vec<TableRecord> {
    /// Parse from any reader. The first row must be the `string_name,value` header.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let mut records = Vec::new();
        for result in rdr.deserialize() {
            records.push(result?);
        }
        Ok(records)
    }

    /// Write with a header row, comma separated.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        write_table(self, writer)
    }
}

/// Writes `records` as `string_name,value` CSV, header included.
///
/// The header is written even when there are no records.
pub fn write_table<W: Write>(records: &[TableRecord], writer: W) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(["string_name", "value"])?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
