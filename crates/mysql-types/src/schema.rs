//! MySQL declared column type parsing.
//!
//! The server reports declared types such as `int(11)`, `int unsigned`,
//! `varchar(255)` or `tinyint(1)`. Compatibility between a live column and a
//! record field only looks at the base type: the type name with parameters
//! and attributes stripped, lowercased.

use crate::ddl::{MySQLDdl, ToDdl};
use record_core::ColumnType;

/// Extract the base type from a declared column type string.
///
/// E.g., "varchar(255)" -> "varchar", "INT(10) UNSIGNED" -> "int"
pub fn base_type(declared_type: &str) -> String {
    declared_type
        .trim()
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Check whether a live column's declared type can hold values of the
/// desired column type.
pub fn is_compatible(declared_type: &str, desired: &ColumnType) -> bool {
    base_type(declared_type) == base_type(&MySQLDdl.to_ddl(desired))
}
