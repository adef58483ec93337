//! Error types for the load library.

use thiserror::Error;

/// Main error type for load operations.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Configuration error (invalid delimiter, unknown encoding label, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse error (malformed record, field count mismatch)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field could not be decoded under the configured encoding
    #[error("Decode error: {0}")]
    Decode(String),

    /// Input file has no header row
    #[error("No header row in {0}")]
    MissingHeader(String),

    /// A data row's field count differs from the header's
    #[error("Expected {expected} fields but found {found}")]
    FieldCount { expected: usize, found: usize },

    /// Database engine error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Table creation failed
    #[error("Schema creation failed for table {table}: {message}")]
    Schema { table: String, message: String },

    /// A batch insert failed partway through a file
    #[error("Insert failed for table {table} after {rows_inserted} rows: {message}")]
    RowInsert {
        table: String,
        rows_inserted: u64,
        message: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    /// Create a Schema error.
    pub fn schema(table: impl Into<String>, message: impl Into<String>) -> Self {
        LoadError::Schema {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a RowInsert error carrying the count inserted before the abort.
    pub fn row_insert(
        table: impl Into<String>,
        rows_inserted: u64,
        message: impl Into<String>,
    ) -> Self {
        LoadError::RowInsert {
            table: table.into(),
            rows_inserted,
            message: message.into(),
        }
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            LoadError::Config(_) => 1,
            LoadError::Io(_)
            | LoadError::Csv(_)
            | LoadError::Decode(_)
            | LoadError::MissingHeader(_)
            | LoadError::FieldCount { .. } => 7,
            _ => 2,
        }
    }
}

/// Result type alias for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;
