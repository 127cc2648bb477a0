//! Support for Apple `.strings` files.
//!
//! Each entry is one line, `"key" = "value";`, keyed by the source text. Reading
//! never stops at a bad line: malformed lines are collected as [`LineError`]s
//! next to the pairs that did parse.

use std::io::{BufRead, Write};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    traits::Parser,
    types::{Escaping, LineError, ResolvedRecord, TableRecord},
};

lazy_static! {
    static ref QUOTED_PAIR_REGEX: Regex =
        Regex::new(r#"^"((?:[^"\\]|\\.)*)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;?$"#).unwrap();
}

const SEPARATOR: &str = " = ";

/// Represents an Apple `.strings` localization file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub escaping: Escaping,
    /// All key-value pairs in file order.
    pub pairs: Vec<Pair>,
    /// Lines that could not be read as a pair. Always empty for a built `Format`.
    pub errors: Vec<LineError>,
}

/// A single key-value pair in a `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Format {
    /// Builds the file for one language; each line is keyed by the source text.
    pub fn from_records(records: &[ResolvedRecord], escaping: Escaping) -> Self {
        Self {
            escaping,
            pairs: records
                .iter()
                .map(|record| Pair {
                    key: record.source_text.clone(),
                    value: record.value.clone(),
                })
                .collect(),
            errors: Vec::new(),
        }
    }

    pub fn into_records(self) -> (Vec<TableRecord>, Vec<LineError>) {
        let records = self
            .pairs
            .into_iter()
            .map(|pair| TableRecord::new(pair.key, pair.value))
            .collect();
        (records, self.errors)
    }
}

impl Parser for Format {
    /// Parses line by line. Blank lines and `//` or `/* */` comments, including
    /// block comments spanning several lines, are skipped; any other line
    /// without a ` = ` separator is recorded in [`Format::errors`].
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let state = reader.lines().enumerate().try_fold(
            LineState::default(),
            |mut state, (index, line)| {
                let line = line?;
                let trimmed = line.trim();
                let number = index + 1;

                if state.open_comment.is_some() {
                    if trimmed.contains("*/") {
                        state.open_comment = None;
                    }
                } else if let Some(rest) = trimmed.strip_prefix("/*") {
                    if !rest.contains("*/") {
                        state.open_comment = Some((number, line.clone()));
                    }
                } else if !trimmed.is_empty() && !trimmed.starts_with("//") {
                    match parse_line(trimmed) {
                        Ok(pair) => state.pairs.push(pair),
                        Err(reason) => state.errors.push(LineError {
                            line: number,
                            content: line.clone(),
                            reason,
                        }),
                    }
                }
                Ok::<_, Error>(state)
            },
        )?;

        let LineState {
            pairs,
            mut errors,
            open_comment,
        } = state;
        if let Some((line, content)) = open_comment {
            errors.push(LineError {
                line,
                content,
                reason: "block comment is never closed".to_string(),
            });
        }

        Ok(Format {
            escaping: Escaping::default(),
            pairs,
            errors,
        })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();

        for pair in &self.pairs {
            let line = match self.escaping {
                Escaping::Standard => {
                    format!("\"{}\" = \"{}\";", escape(&pair.key), escape(&pair.value))
                }
                Escaping::Legacy => format!("\"{}\" = \"{}\";", pair.key, pair.value),
            };
            content.push_str(&line);
            content.push('\n');
        }

        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

#[derive(Default)]
struct LineState {
    pairs: Vec<Pair>,
    errors: Vec<LineError>,
    /// Line number and text where an unclosed `/*` started.
    open_comment: Option<(usize, String)>,
}

fn parse_line(line: &str) -> Result<Pair, String> {
    if let Some(captures) = QUOTED_PAIR_REGEX.captures(line) {
        return Ok(Pair {
            key: unescape(&captures[1]),
            value: unescape(&captures[2]),
        });
    }

    // Hand-edited lines: unbalanced quotes, unquoted keys, a trailing comment.
    let (key, value) = line
        .split_once(SEPARATOR)
        .ok_or_else(|| format!("missing `{}` separator", SEPARATOR.trim()))?;

    let key = strip_quotes(key.trim());
    let value = value.trim();
    let value = strip_quotes(value.strip_suffix(';').unwrap_or(value).trim_end());

    Ok(Pair {
        key: unescape(key),
        value: unescape(value),
    })
}

/// Removes one layer of wrapping double quotes.
fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Decodes `\\`, `\"`, `\n`, `\r` and `\t`; any other backslash is kept as is.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
