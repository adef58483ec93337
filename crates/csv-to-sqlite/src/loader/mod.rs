//! Batched loading into SQLite.
//!
//! One `SqliteLoader` wraps the run-level connection. For each file it
//! creates the destination table from the inferred schema, then streams
//! data rows in as fixed-size multi-row parameterized inserts. Inserts run
//! in autocommit mode: a mid-file failure aborts the remaining batches but
//! leaves previously committed batches in place.

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::config::QuoteMode;
use crate::core::identifier::{quote, validate_identifier};
use crate::core::ColumnSchema;
use crate::error::{LoadError, Result};

/// SQLITE_MAX_VARIABLE_NUMBER defaults to 32766 since SQLite 3.32; keep
/// the bound-parameter count per statement under it even for wide files.
const MAX_BOUND_PARAMS: usize = 32_000;

/// Destination database handle for one run.
pub struct SqliteLoader {
    conn: Connection,
}

impl SqliteLoader {
    /// Open (creating if absent) the destination database file.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        info!("Opened database {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory destination database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the destination table for one file.
    ///
    /// With `drop_existing`, a pre-existing table of the same name is
    /// dropped first; a missing table is the only drop failure that is
    /// ignored, any other engine error propagates. Creation fails with a
    /// `Schema` error for a zero-column schema, an invalid identifier, or
    /// an engine-level create failure (e.g. the table already exists and
    /// `drop_existing` is false).
    pub fn create_table(
        &self,
        table: &str,
        schema: &ColumnSchema,
        quoting: QuoteMode,
        drop_existing: bool,
    ) -> Result<()> {
        validate_identifier(table).map_err(|e| LoadError::schema(table, e.to_string()))?;
        for column in schema.columns() {
            validate_identifier(&column.name)
                .map_err(|e| LoadError::schema(table, e.to_string()))?;
        }
        if schema.is_empty() {
            return Err(LoadError::schema(table, "table has no columns"));
        }

        if drop_existing {
            debug!("Dropping table {}", table);
            let drop_sql = format!("DROP TABLE {}", quote(table, quoting));
            match self.conn.execute(&drop_sql, []) {
                Ok(_) => {}
                Err(e) if is_missing_table(&e) => debug!("Table {} did not exist", table),
                Err(e) => return Err(LoadError::schema(table, e.to_string())),
            }
        }

        let sql = create_table_sql(table, schema, quoting);
        self.conn
            .execute(&sql, [])
            .map_err(|e| LoadError::schema(table, e.to_string()))?;
        info!("Created table {} ({} columns)", table, schema.len());
        Ok(())
    }

    /// Stream data rows into the table in batches of `batch_size`.
    ///
    /// `rows` must already be positioned past the header. Full batches go
    /// through one cached multi-row insert statement; the partial
    /// remainder flushes at end of stream. A cursor error, a row with the
    /// wrong field count, or an engine-level insert failure aborts the
    /// remaining batches with a `RowInsert` error carrying the count
    /// inserted before the abort; earlier batches stay committed. Returns
    /// the total row count on success.
    pub fn insert_rows<I>(
        &self,
        table: &str,
        schema: &ColumnSchema,
        rows: I,
        quoting: QuoteMode,
        batch_size: usize,
    ) -> Result<u64>
    where
        I: IntoIterator<Item = Result<Vec<String>>>,
    {
        let columns = schema.len();
        let rows_per_batch = batch_size
            .min(MAX_BOUND_PARAMS / columns.max(1))
            .max(1);
        let full_batch_sql = insert_sql(table, quoting, columns, rows_per_batch);

        let mut inserted: u64 = 0;
        let mut batch: Vec<String> = Vec::with_capacity(rows_per_batch * columns);
        let mut batch_rows = 0usize;

        for row in rows {
            let row =
                row.map_err(|e| LoadError::row_insert(table, inserted, e.to_string()))?;
            if row.len() != columns {
                return Err(LoadError::row_insert(
                    table,
                    inserted,
                    format!("expected {} fields but row has {}", columns, row.len()),
                ));
            }

            batch.extend(row);
            batch_rows += 1;

            if batch_rows == rows_per_batch {
                let mut stmt = self
                    .conn
                    .prepare_cached(&full_batch_sql)
                    .map_err(|e| LoadError::row_insert(table, inserted, e.to_string()))?;
                stmt.execute(rusqlite::params_from_iter(batch.iter()))
                    .map_err(|e| LoadError::row_insert(table, inserted, e.to_string()))?;
                inserted += batch_rows as u64;
                debug!("{}: flushed batch of {} rows", table, batch_rows);
                batch.clear();
                batch_rows = 0;
            }
        }

        if batch_rows > 0 {
            let sql = insert_sql(table, quoting, columns, batch_rows);
            self.conn
                .execute(&sql, rusqlite::params_from_iter(batch.iter()))
                .map_err(|e| LoadError::row_insert(table, inserted, e.to_string()))?;
            inserted += batch_rows as u64;
            debug!("{}: flushed final batch of {} rows", table, batch_rows);
        }

        info!("Inserted {} rows into {}", inserted, table);
        Ok(inserted)
    }

    /// Finalize the run: commit any open transaction and close the
    /// connection, propagating close errors.
    pub fn finish(self) -> Result<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        self.conn.close().map_err(|(_, e)| LoadError::Database(e))
    }
}

/// Render the create-table statement: each column with its quoted (or
/// bare) name and inferred storage type, in header order.
pub fn create_table_sql(table: &str, schema: &ColumnSchema, quoting: QuoteMode) -> String {
    let columns = schema
        .columns()
        .iter()
        .map(|c| format!("\t{} {}", quote(&c.name, quoting), c.column_type.as_sql()))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TABLE {} (\n{}\n)", quote(table, quoting), columns)
}

fn insert_sql(table: &str, quoting: QuoteMode, columns: usize, rows: usize) -> String {
    let tuple = format!("({})", vec!["?"; columns].join(","));
    let values = vec![tuple; rows].join(",");
    format!("INSERT INTO {} VALUES {}", quote(table, quoting), values)
}

fn is_missing_table(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(message)) if message.starts_with("no such table")
    )
}
