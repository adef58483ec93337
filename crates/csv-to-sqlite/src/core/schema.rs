//! Schema types for destination tables.

use serde::{Deserialize, Serialize};

use crate::infer::ColumnType;

/// Column metadata: a header name paired with its inferred storage type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, taken verbatim from the header row.
    pub name: String,

    /// Inferred storage type, frozen before table creation.
    pub column_type: ColumnType,
}

/// Ordered column definitions for one destination table. Column order
/// exactly matches header order; the count is fixed at header-read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Pair header names with their inferred types, in header order.
    ///
    /// # Panics
    ///
    /// Panics if the two sequences differ in length; both derive from the
    /// same header row, so a mismatch is a programming error.
    pub fn new(names: Vec<String>, types: Vec<ColumnType>) -> Self {
        assert_eq!(names.len(), types.len(), "column name/type count mismatch");
        let columns = names
            .into_iter()
            .zip(types)
            .map(|(name, column_type)| Column { name, column_type })
            .collect();
        Self { columns }
    }

    /// The column definitions in header order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
