//! Configuration validation.

use super::LoadOptions;
use crate::error::{LoadError, Result};

/// Validate the configuration.
pub fn validate(options: &LoadOptions) -> Result<()> {
    if options.batch_size == 0 {
        return Err(LoadError::Config("batch_size must be at least 1".into()));
    }

    options.delimiter_byte()?;
    options.resolve_encoding()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_options() {
        assert!(validate(&LoadOptions::default()).is_ok());
    }

    #[test]
    fn test_zero_batch_size() {
        let mut options = LoadOptions::default();
        options.batch_size = 0;
        assert!(validate(&options).is_err());
    }

    #[test]
    fn test_non_ascii_delimiter() {
        let mut options = LoadOptions::default();
        options.delimiter = '☃';
        assert!(validate(&options).is_err());
    }

    #[test]
    fn test_unknown_encoding() {
        let mut options = LoadOptions::default();
        options.encoding = "utf-9".to_string();
        assert!(validate(&options).is_err());
    }
}
