//! Table shape definitions.
//!
//! ## Type Hierarchy
//!
//! - `Column` - A column a record needs: name plus inferred [`ColumnType`]
//! - `LiveColumn` - A column as it exists in the database: name plus the
//!   declared type string the server reports (e.g. `int(11)`)
//! - `TableSchema` - Ordered live columns of one table

use crate::error::RecordError;
use crate::types::ColumnType;
use crate::values::Record;

/// Column names managed by the table itself; records may never supply them.
///
/// `id` and `created` are created with every table. `modified` is held back
/// for future use.
pub const RESERVED_COLUMNS: [&str; 3] = ["id", "created", "modified"];

/// Check whether a name is reserved.
///
/// MySQL column names are case-insensitive, so `ID` names the same column as
/// `id` and is reserved too.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_COLUMNS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// A column implied by a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Infer the desired columns for every non-null field, in record order.
    pub fn from_record(record: &Record) -> Result<Vec<Self>, RecordError> {
        record
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| Ok(Self::new(name, ColumnType::infer(name, value)?)))
            .collect()
    }
}

/// A column as reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveColumn {
    pub name: String,
    /// Declared type exactly as the server reports it.
    pub declared_type: String,
}

impl LiveColumn {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// Live schema of one table, in ordinal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: Vec<LiveColumn>,
}

impl TableSchema {
    pub fn new(columns: Vec<LiveColumn>) -> Self {
        Self { columns }
    }

    /// Get a column by name, ignoring case as MySQL does.
    ///
    /// An exact match wins over a case-insensitive one.
    pub fn get(&self, name: &str) -> Option<&LiveColumn> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .or_else(|| {
                self.columns
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(name))
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Column names in ordinal order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
