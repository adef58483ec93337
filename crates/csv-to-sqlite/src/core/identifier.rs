//! Table naming and identifier quoting.
//!
//! SQL identifiers (table names, column names) cannot be passed as
//! parameters in prepared statements; only data values can. Generated SQL
//! therefore embeds identifiers directly, and this module is the single
//! place that renders them: validation for suspicious input, plus SQLite's
//! bracket quoting with embedded closing brackets doubled.

use std::path::Path;

use crate::config::QuoteMode;
use crate::error::{LoadError, Result};

/// Derive a table name from a file path: the base name with the extension
/// stripped, verbatim. No sanitization, no collision detection; two inputs
/// with the same stem collide and the second load's behavior depends on
/// the drop-tables policy.
pub fn table_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Validate an identifier before it is embedded in generated SQL.
///
/// Rejects empty identifiers and identifiers containing null bytes.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LoadError::Config("Identifier cannot be empty".to_string()));
    }

    if name.contains('\0') {
        return Err(LoadError::Config(format!(
            "Identifier contains null byte: {:?}",
            name
        )));
    }

    Ok(())
}

/// Render an identifier under the configured quoting mode.
///
/// `All` wraps the identifier in brackets, escaping embedded closing
/// brackets by doubling them: `]` becomes `]]`. `None` returns the
/// identifier unmodified; responsibility for producing valid identifiers
/// then shifts to the data source.
pub fn quote(name: &str, mode: QuoteMode) -> String {
    match mode {
        QuoteMode::All => format!("[{}]", name.replace(']', "]]")),
        QuoteMode::None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_strips_directory_and_extension() {
        assert_eq!(table_name(Path::new("data/abilities.csv")), "abilities");
        assert_eq!(table_name(Path::new("/tmp/out/natures.tsv")), "natures");
        assert_eq!(table_name(Path::new("moves")), "moves");
    }

    #[test]
    fn test_table_name_is_verbatim() {
        // No sanitization: odd characters survive into the table name.
        assert_eq!(table_name(Path::new("my table!.csv")), "my table!");
        // Dotfiles keep their whole name as the stem.
        assert_eq!(table_name(Path::new(".hidden")), ".hidden");
    }

    #[test]
    fn test_same_stem_collides() {
        assert_eq!(
            table_name(Path::new("a/stats.csv")),
            table_name(Path::new("b/stats.txt"))
        );
    }

    #[test]
    fn test_quote_all() {
        assert_eq!(quote("natures", QuoteMode::All), "[natures]");
        assert_eq!(quote("game index", QuoteMode::All), "[game index]");
    }

    #[test]
    fn test_quote_all_escapes_bracket() {
        assert_eq!(quote("a]b", QuoteMode::All), "[a]]b]");
        assert_eq!(quote("a]b]c", QuoteMode::All), "[a]]b]]c]");
    }

    #[test]
    fn test_quote_none_is_verbatim() {
        assert_eq!(quote("natures", QuoteMode::None), "natures");
        assert_eq!(quote("a]b", QuoteMode::None), "a]b");
    }

    #[test]
    fn test_quote_injection_safely_bracketed() {
        let quoted = quote("x]; DROP TABLE users;--", QuoteMode::All);
        assert_eq!(quoted, "[x]]; DROP TABLE users;--]");
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("natures").is_ok());
        assert!(validate_identifier("column with spaces").is_ok());
        assert!(validate_identifier("日本語").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("a\0b").is_err());
    }
}
