//! Resource file formats: Android `strings.xml`, Apple `.strings`, and the CSV
//! table resource files are imported into.

pub mod android_strings;
pub mod csv;
pub mod strings;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

// Reexporting the formats for easier access
pub use android_strings::Format as AndroidStringsFormat;
pub use self::csv::write_table;
pub use strings::Format as StringsFormat;

use crate::{error::Error, types::Platform};

/// A resource file format that can be converted back into a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    /// Android `strings.xml`.
    AndroidStrings,
    /// Apple `.strings`.
    Strings,
}

impl ResourceFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ResourceFormat::AndroidStrings => "xml",
            ResourceFormat::Strings => "strings",
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            ResourceFormat::AndroidStrings => Platform::Android,
            ResourceFormat::Strings => Platform::Ios,
        }
    }
}

impl From<Platform> for ResourceFormat {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Android => ResourceFormat::AndroidStrings,
            Platform::Ios => ResourceFormat::Strings,
        }
    }
}

impl Display for ResourceFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceFormat::AndroidStrings => write!(f, "xml"),
            ResourceFormat::Strings => write!(f, "strings"),
        }
    }
}

impl FromStr for ResourceFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" | "android" => Ok(ResourceFormat::AndroidStrings),
            "strings" | "ios" | "apple" => Ok(ResourceFormat::Strings),
            _ => Err(Error::UnsupportedFormat(format!(
                "unknown resource format `{}`, expected xml or strings",
                s
            ))),
        }
    }
}

/// Infers the resource format from a file extension.
///
/// # Examples
/// ```rust
/// use stringsheet::formats::{ResourceFormat, infer_format_from_extension};
/// assert_eq!(
///     infer_format_from_extension("values-fr/strings.xml"),
///     Some(ResourceFormat::AndroidStrings)
/// );
/// assert_eq!(
///     infer_format_from_extension("fr.lproj/Localizable.strings"),
///     Some(ResourceFormat::Strings)
/// );
/// assert_eq!(infer_format_from_extension("notes.txt"), None);
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<ResourceFormat> {
    match path.as_ref().extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xml") => Some(ResourceFormat::AndroidStrings),
        Some(ext) if ext.eq_ignore_ascii_case("strings") => Some(ResourceFormat::Strings),
        _ => None,
    }
}
