//! Configuration type definitions.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

/// Policy governing how many data rows are scanned before freezing a
/// column's inferred type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingMode {
    /// Scan every data row before table creation.
    #[default]
    Full,

    /// Scan only the first data row. A column whose first value is "1" but
    /// whose later values are "1.5" is typed integer; accepted trade-off
    /// for speed.
    Quick,

    /// No scan; every column is text.
    None,
}

impl TypingMode {
    /// Parse a typing mode from its lowercase name.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "full" => Ok(TypingMode::Full),
            "quick" => Ok(TypingMode::Quick),
            "none" => Ok(TypingMode::None),
            other => Err(LoadError::Config(format!(
                "Invalid typing mode '{}'. Valid options: full, quick, none",
                other
            ))),
        }
    }
}

/// Policy for wrapping generated identifiers in SQLite's bracket syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    /// Quote every generated identifier.
    #[default]
    All,

    /// Emit identifiers bare; the data source is responsible for producing
    /// valid ones.
    None,
}

impl QuoteMode {
    /// Parse a quote mode from its lowercase name.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(QuoteMode::All),
            "none" => Ok(QuoteMode::None),
            other => Err(LoadError::Config(format!(
                "Invalid quote mode '{}'. Valid options: all, none",
                other
            ))),
        }
    }
}

/// Load behavior configuration. Constructed once per run and shared
/// read-only across all files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Column typing mode (default: full).
    #[serde(default)]
    pub typing: TypingMode,

    /// Drop pre-existing tables of the same name before creation
    /// (default: false).
    #[serde(default)]
    pub drop_tables: bool,

    /// Field delimiter (default: ',').
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Text encoding label, resolved via the WHATWG label registry
    /// (default: "utf-8").
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Identifier quoting mode (default: all).
    #[serde(default)]
    pub quoting: QuoteMode,

    /// Rows per multi-row insert statement (default: 1000).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_delimiter() -> char {
    ','
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_batch_size() -> usize {
    1000
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            typing: TypingMode::default(),
            drop_tables: false,
            delimiter: default_delimiter(),
            encoding: default_encoding(),
            quoting: QuoteMode::default(),
            batch_size: default_batch_size(),
        }
    }
}

impl LoadOptions {
    /// Resolve the configured encoding label.
    pub fn resolve_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.as_bytes()).ok_or_else(|| {
            LoadError::Config(format!("Unknown encoding label '{}'", self.encoding))
        })
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(LoadError::Config(format!(
                "Delimiter '{}' must be a single ASCII character",
                self.delimiter
            )))
        }
    }
}
