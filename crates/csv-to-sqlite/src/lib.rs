//! # csv-to-sqlite
//!
//! Library for copying delimited text files into a SQLite database, one
//! table per file, with support for:
//!
//! - **Column type inference** over a widening lattice (integer → real →
//!   text) in full, quick (first row), or none modes
//! - **Batched inserts** using multi-row parameterized statements
//! - **Configurable delimiter, encoding, and identifier quoting**
//! - **Per-file failure isolation**: one bad file never aborts the run
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//! use csv_to_sqlite::{LoadOptions, Orchestrator};
//!
//! fn main() -> csv_to_sqlite::Result<()> {
//!     let options = LoadOptions::default();
//!     let orchestrator = Orchestrator::new(Path::new("out.db"), options)?;
//!     let report = orchestrator.run(&[PathBuf::from("abilities.csv")])?;
//!     println!("Written {} rows", report.rows_inserted);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod infer;
pub mod loader;
pub mod orchestrator;
pub mod scan;

// Re-exports for convenient access
pub use config::{LoadOptions, QuoteMode, TypingMode};
pub use core::{Column, ColumnSchema};
pub use error::{LoadError, Result};
pub use infer::ColumnType;
pub use loader::SqliteLoader;
pub use orchestrator::{FileFailure, LoadReport, Orchestrator};
pub use scan::CsvScanner;
