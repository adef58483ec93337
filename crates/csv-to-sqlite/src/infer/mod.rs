//! Column type inference.
//!
//! Each raw field classifies as the minimal storage type that losslessly
//! represents it, and per-column classifications fold into a widening
//! lattice: integer → real → text, with text absorbing. A column's type
//! only ever widens during the typing pass, never narrows.

use serde::{Deserialize, Serialize};

use crate::config::TypingMode;
use crate::error::{LoadError, Result};

/// SQLite storage type for a column.
///
/// The derived ordering is the widening lattice: `Integer < Real < Text`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    /// The type name as it appears in generated SQL.
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Text => "text",
        }
    }

    /// Fold an observed classification into the current type: the least
    /// upper bound under the widening lattice. Text is absorbing and
    /// identical classifications are no-ops.
    pub fn widen(self, observed: ColumnType) -> ColumnType {
        self.max(observed)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Classify a raw field value as the minimal type that represents it.
///
/// A value is `Integer` iff it parses as a signed base-10 integer, else
/// `Real` iff it parses as a floating-point number, else `Text`. No
/// whitespace tolerance beyond what the numeric parsers themselves accept.
pub fn classify(raw: &str) -> ColumnType {
    if raw.parse::<i64>().is_ok() {
        ColumnType::Integer
    } else if raw.parse::<f64>().is_ok() {
        ColumnType::Real
    } else {
        ColumnType::Text
    }
}

/// Determine column types for one file under the configured typing mode.
///
/// `rows` must be a freshly restarted cursor positioned at the first data
/// row (header already skipped); it is left exhausted in `Full` mode, so
/// the caller requests another restart for the insert pass.
pub fn column_types<I>(mode: TypingMode, column_count: usize, rows: I) -> Result<Vec<ColumnType>>
where
    I: IntoIterator<Item = Result<Vec<String>>>,
{
    match mode {
        TypingMode::None => Ok(vec![ColumnType::Text; column_count]),
        TypingMode::Quick => {
            let mut types = vec![ColumnType::Integer; column_count];
            if let Some(row) = rows.into_iter().next() {
                fold_row(&mut types, &row?)?;
            }
            Ok(types)
        }
        TypingMode::Full => {
            let mut types = vec![ColumnType::Integer; column_count];
            for row in rows {
                fold_row(&mut types, &row?)?;
            }
            Ok(types)
        }
    }
}

fn fold_row(types: &mut [ColumnType], row: &[String]) -> Result<()> {
    if row.len() != types.len() {
        return Err(LoadError::FieldCount {
            expected: types.len(),
            found: row.len(),
        });
    }
    for (current, value) in types.iter_mut().zip(row) {
        if *current == ColumnType::Text {
            continue;
        }
        *current = current.widen(classify(value));
    }
    Ok(())
}
