//! Error types for schema synchronization.

use record_core::RecordError;
use thiserror::Error;

/// MySQL error code for "Duplicate column name".
const ER_DUP_FIELDNAME: u16 = 1060;

/// Errors raised by a database collaborator while executing a statement.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// An added column already exists, typically because a concurrent writer
    /// added it first.
    #[error("Column '{column}' already exists")]
    DuplicateColumn { column: String },

    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(mysql_async::Error),

    /// Statement rejected by a non-MySQL backend.
    #[error("Statement rejected: {0}")]
    Rejected(String),
}

impl From<mysql_async::Error> for ExecutionError {
    fn from(err: mysql_async::Error) -> Self {
        match &err {
            mysql_async::Error::Server(server) if server.code == ER_DUP_FIELDNAME => {
                ExecutionError::DuplicateColumn {
                    column: quoted_name(&server.message)
                        .unwrap_or(&server.message)
                        .to_string(),
                }
            }
            _ => ExecutionError::MySQL(err),
        }
    }
}

/// Extract `score` from a server message like `Duplicate column name 'score'`.
fn quoted_name(message: &str) -> Option<&str> {
    let start = message.find('\'')?;
    let end = message.rfind('\'')?;
    (start < end).then(|| &message[start + 1..end])
}

/// Errors that abort a synchronization call.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A record field uses a name managed by the table itself.
    #[error("\"{column}\" is a reserved column name")]
    ReservedColumn { column: String },

    /// A field value has no column type mapping.
    #[error("Field '{field}' has unsupported type: {kind}")]
    UnsupportedType { field: String, kind: String },

    /// A live column's base type disagrees with the type a record implies.
    #[error(
        "Provided type for column '{column}' ({desired}) did not match existing type ({existing})"
    )]
    TypeConflict {
        column: String,
        desired: String,
        existing: String,
    },

    /// Two fields name the same MySQL column, differing only in case.
    #[error("Fields '{column}' and '{other}' name the same column")]
    ColumnNameCollision { column: String, other: String },

    /// The target table name cannot be used.
    #[error("Invalid table name '{table}'")]
    InvalidTableName { table: String },

    /// The record itself is malformed.
    #[error("Invalid record: {0}")]
    InvalidRecord(RecordError),

    /// The database rejected a statement.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl From<RecordError> for SyncError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::UnsupportedType { field, kind } => {
                SyncError::UnsupportedType { field, kind }
            }
            other => SyncError::InvalidRecord(other),
        }
    }
}

impl From<mysql_async::Error> for SyncError {
    fn from(err: mysql_async::Error) -> Self {
        SyncError::Execution(err.into())
    }
}
