//! MySQL DDL generation from `ColumnType`.
//!
//! Identifiers are always backtick-quoted; values never appear in generated
//! statements, only `?` placeholders.

use record_core::{Column, ColumnType};

/// Trait for generating DDL type strings.
pub trait ToDdl {
    /// Convert a ColumnType to a DDL type string.
    fn to_ddl(&self, column_type: &ColumnType) -> String;
}

/// MySQL DDL generator.
pub struct MySQLDdl;

/// Definition of the auto-incrementing primary key every table starts with.
pub const ID_COLUMN_DDL: &str = "`id` INT AUTO_INCREMENT PRIMARY KEY";

/// Definition of the insertion timestamp every table starts with.
pub const CREATED_COLUMN_DDL: &str = "`created` DATETIME DEFAULT CURRENT_TIMESTAMP";

/// Quote an identifier with backticks, doubling any embedded backtick.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

impl ToDdl for MySQLDdl {
    fn to_ddl(&self, column_type: &ColumnType) -> String {
        match column_type {
            // Boolean - stored as 0/1
            ColumnType::TinyInt => "TINYINT".to_string(),
            ColumnType::Int => "INT".to_string(),
            ColumnType::Float => "FLOAT".to_string(),
            ColumnType::VarChar => format!("VARCHAR({})", ColumnType::VARCHAR_LENGTH),
        }
    }
}

impl MySQLDdl {
    /// Generate the create-if-absent statement holding only the reserved columns.
    pub fn to_create_table_if_absent(&self, table_name: &str) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({ID_COLUMN_DDL}, {CREATED_COLUMN_DDL})",
            quote_identifier(table_name)
        )
    }

    /// Generate a single ALTER TABLE adding every given column.
    ///
    /// Returns `None` when there is nothing to add.
    pub fn to_add_columns(&self, table_name: &str, columns: &[Column]) -> Option<String> {
        if columns.is_empty() {
            return None;
        }

        let additions: Vec<String> = columns
            .iter()
            .map(|c| {
                format!(
                    "ADD COLUMN {} {}",
                    quote_identifier(&c.name),
                    self.to_ddl(&c.column_type)
                )
            })
            .collect();

        Some(format!(
            "ALTER TABLE {} {}",
            quote_identifier(table_name),
            additions.join(", ")
        ))
    }

    /// Generate an INSERT statement template.
    pub fn to_insert(&self, table_name: &str, columns: &[&str]) -> String {
        let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(table_name),
            columns
                .iter()
                .map(|c| quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", "),
            placeholders.join(", ")
        )
    }
}
