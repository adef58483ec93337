//! Run orchestrator - sequences scanning, typing, and loading per file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::{LoadOptions, TypingMode};
use crate::core::identifier;
use crate::core::ColumnSchema;
use crate::error::Result;
use crate::infer;
use crate::loader::SqliteLoader;
use crate::scan::CsvScanner;

/// Load orchestrator. Owns the run-level database connection and processes
/// input files strictly sequentially, in input order.
pub struct Orchestrator {
    options: LoadOptions,
    encoding: &'static Encoding,
    delimiter: u8,
    loader: SqliteLoader,
}

/// One failed file, tagged with its table name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// Table name derived from the failing file's path.
    pub table: String,

    /// Rendered cause.
    pub error: String,
}

/// Result of a load run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Files attempted.
    pub files_total: usize,

    /// Files fully loaded.
    pub files_loaded: usize,

    /// Files that failed.
    pub files_failed: usize,

    /// Total rows inserted across fully loaded files.
    pub rows_inserted: u64,

    /// Per-file failures, in input order.
    pub failures: Vec<FileFailure>,
}

impl LoadReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Orchestrator {
    /// Create a new orchestrator: validate options, resolve the encoding
    /// label once, and open (creating if absent) the destination database.
    pub fn new(db_path: &Path, options: LoadOptions) -> Result<Self> {
        options.validate()?;
        let encoding = options.resolve_encoding()?;
        let delimiter = options.delimiter_byte()?;
        let loader = SqliteLoader::open(db_path)?;
        Ok(Self {
            options,
            encoding,
            delimiter,
            loader,
        })
    }

    /// Run the load: one table per input file.
    ///
    /// Files are processed in input order; duplicates are processed twice.
    /// Any error while processing one file is caught at the per-file
    /// boundary, reported against that file's table name, and the run
    /// continues with the next file. A failed file contributes no rows to
    /// the run total, even when some of its batches committed before the
    /// failure. The connection is finalized exactly once after the last
    /// file, regardless of how many files failed.
    pub fn run(self, files: &[PathBuf]) -> Result<LoadReport> {
        let started_at = Utc::now();

        let mut rows_inserted: u64 = 0;
        let mut files_loaded = 0usize;
        let mut failures = Vec::new();

        for path in files {
            let table = identifier::table_name(path);
            info!("Loading {} into table {}", path.display(), table);
            match self.process_file(path, &table) {
                Ok(rows) => {
                    rows_inserted += rows;
                    files_loaded += 1;
                }
                Err(e) => {
                    error!("Error on table {}: {}", table, e);
                    failures.push(FileFailure {
                        table,
                        error: e.to_string(),
                    });
                }
            }
        }

        self.loader.finish()?;

        let completed_at = Utc::now();
        let duration_seconds = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        info!(
            "Written {} rows into {} tables in {:.3} seconds",
            rows_inserted,
            files.len(),
            duration_seconds
        );

        Ok(LoadReport {
            started_at,
            completed_at,
            duration_seconds,
            files_total: files.len(),
            files_loaded,
            files_failed: failures.len(),
            rows_inserted,
            failures,
        })
    }

    /// Process one file: typing pass, table creation, insert pass. The
    /// scanner (and its file handle) is released when this returns, on
    /// success and error paths alike.
    fn process_file(&self, path: &Path, table: &str) -> Result<u64> {
        let mut scanner = CsvScanner::open(path, self.delimiter, self.encoding)?;
        let header = scanner.headers().to_vec();

        let types = match self.options.typing {
            // No scan at all in this mode.
            TypingMode::None => {
                infer::column_types(TypingMode::None, header.len(), std::iter::empty())?
            }
            mode => {
                let mut cursor = scanner.rows()?;
                if let Some(first) = cursor.next() {
                    first?;
                }
                infer::column_types(mode, header.len(), cursor)?
            }
        };
        let schema = ColumnSchema::new(header, types);

        self.loader.create_table(
            table,
            &schema,
            self.options.quoting,
            self.options.drop_tables,
        )?;

        let mut cursor = scanner.rows()?;
        if let Some(first) = cursor.next() {
            first?;
        }
        self.loader.insert_rows(
            table,
            &schema,
            cursor,
            self.options.quoting,
            self.options.batch_size,
        )
    }
}
