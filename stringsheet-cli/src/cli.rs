//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use stringsheet::{Platform, ResourceFormat};

#[derive(Parser, Debug)]
#[command(name = "stringsheet", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one resource file per language from the two tables.
    Generate(GenerateArgs),

    /// Convert a resource file back into a `string_name,value` table.
    Convert(ConvertArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Identifier table (`string_name`, `english_value`): xlsx, xls, ods, CSV or TSV
    #[arg(long, value_name = "FILE")]
    pub identifiers: PathBuf,

    /// Translation table (`english_value` plus one column per language): xlsx, xls, ods, CSV or TSV
    #[arg(long, value_name = "FILE")]
    pub translations: PathBuf,

    /// Target platform: android or ios
    #[arg(short, long, default_value = "android")]
    pub platform: Platform,

    /// First identifier row to include (0-based)
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Last identifier row to include, inclusive (defaults to the last row)
    #[arg(long)]
    pub end: Option<usize>,

    /// Only generate these languages (repeatable; defaults to every column)
    #[arg(short, long = "lang", value_name = "LANG")]
    pub languages: Vec<String>,

    /// Directory the generated files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Write values without escaping, byte for byte
    #[arg(long)]
    pub legacy_escaping: bool,

    /// Fail when the translation table repeats a source text
    #[arg(long)]
    pub reject_duplicates: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Resource file to read (`.xml` or `.strings`)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Resource format, inferred from the extension when omitted: xml or strings
    #[arg(short, long)]
    pub format: Option<ResourceFormat>,

    /// CSV file to write (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
