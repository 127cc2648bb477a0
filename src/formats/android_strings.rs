//! Support for Android `strings.xml` resource files.
//!
//! Only `<string>` elements directly under the root are read; `<plurals>` and
//! `<string-array>` are skipped. Output is the compact layout the legacy
//! generator produced: no XML declaration, four-space indent, no trailing newline.

use quick_xml::{
    Reader, Writer,
    escape::partial_escape,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use crate::{
    error::Error,
    traits::Parser,
    types::{Escaping, ResolvedRecord, TableRecord},
};

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub escaping: Escaping,
    pub strings: Vec<StringResource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringResource {
    pub name: String,
    pub value: String,
}

impl Format {
    /// Builds the resource file for one language from its resolved records.
    pub fn from_records(records: &[ResolvedRecord], escaping: Escaping) -> Self {
        Self {
            escaping,
            strings: records
                .iter()
                .map(|record| StringResource {
                    name: record.name.clone(),
                    value: record.value.clone(),
                })
                .collect(),
        }
    }

    pub fn into_records(self) -> Vec<TableRecord> {
        self.strings
            .into_iter()
            .map(|sr| TableRecord::new(sr.name, sr.value))
            .collect()
    }
}

impl Parser for Format {
    /// Parse from any reader.
    ///
    /// Fails on a document that is not well-formed, has no root element, or has a
    /// `<string>` without a `name`.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut strings = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if depth == 1 && e.name().as_ref() == b"string" => {
                    let name = string_name(e)?;
                    let value = read_text_content(&mut xml_reader)?;
                    strings.push(StringResource { name, value });
                }
                Ok(Event::Empty(ref e)) if depth == 1 && e.name().as_ref() == b"string" => {
                    strings.push(StringResource {
                        name: string_name(e)?,
                        value: String::new(),
                    });
                }
                Ok(Event::Start(_)) => {
                    if depth == 0 && saw_root {
                        return Err(Error::parse_error("more than one root element"));
                    }
                    saw_root = true;
                    depth += 1;
                }
                Ok(Event::Empty(_)) if depth == 0 => {
                    if saw_root {
                        return Err(Error::parse_error("more than one root element"));
                    }
                    saw_root = true;
                }
                Ok(Event::End(_)) => depth = depth.saturating_sub(1),
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        if !saw_root {
            return Err(Error::parse_error("no root element found"));
        }
        if depth > 0 {
            return Err(Error::parse_error("unexpected end of document"));
        }

        Ok(Format {
            escaping: Escaping::default(),
            strings,
        })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;

        for sr in &self.strings {
            let (elem, text) = match self.escaping {
                Escaping::Standard => {
                    let mut elem = BytesStart::new("string");
                    elem.push_attribute(("name", sr.name.as_str()));
                    (elem, BytesText::from_escaped(partial_escape(&sr.value)))
                }
                Escaping::Legacy => (
                    BytesStart::from_content(format!("string name=\"{}\"", sr.name), 6),
                    BytesText::from_escaped(sr.value.as_str()),
                ),
            };

            xml_writer.write_event(Event::Text(BytesText::from_escaped(INDENT)))?;
            xml_writer.write_event(Event::Start(elem))?;
            xml_writer.write_event(Event::Text(text))?;
            xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
            xml_writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        Ok(())
    }
}

fn string_name(e: &BytesStart<'_>) -> Result<String, Error> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::parse_error(e.to_string()))?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::parse_error("string tag missing 'name'"))
}

/// Collects the text content of the element just opened, including text inside
/// nested inline markup, up to its matching end tag.
fn read_text_content<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    let mut depth = 0usize;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => value.push_str(&e.unescape()?),
            Ok(Event::CData(e)) => value.push_str(&String::from_utf8_lossy(&e)),
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) if depth == 0 => break,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => return Err(Error::parse_error("unexpected end of document")),
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }

    Ok(value)
}
