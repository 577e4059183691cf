//! Database collaborator traits.
//!
//! The engine never talks to a driver directly. It needs a provider that
//! hands out connections, and connections that can describe, create and
//! alter a table, insert one row and commit.
//!
//! ```ignore
//! pub async fn synchronize<P: ConnectionProvider>(
//!     provider: &P,
//!     table: &str,
//!     record: Record,
//! ) -> Result<Record, SyncError> {
//!     let mut conn = provider.acquire().await?;
//!     // ...
//! }
//! ```
//!
//! A connection is released by dropping it, so every exit path of a scope
//! that owns one releases it.

use crate::error::ExecutionError;
use async_trait::async_trait;
use record_core::{Column, Record, TableSchema};

/// One open connection to the database.
#[async_trait]
pub trait SchemaConnection: Send {
    /// Read the live columns of a table in ordinal order.
    ///
    /// A table that does not exist yields an empty schema.
    async fn describe_table(&mut self, table: &str) -> Result<TableSchema, ExecutionError>;

    /// Create the table with only its reserved columns if it does not exist.
    async fn create_table_if_absent(&mut self, table: &str) -> Result<(), ExecutionError>;

    /// Add all columns in a single statement.
    ///
    /// Fails with [`ExecutionError::DuplicateColumn`] when any of them
    /// already exists, in which case none are added.
    async fn add_columns(&mut self, table: &str, columns: &[Column]) -> Result<(), ExecutionError>;

    /// Insert one row with every value bound as a parameter. Not committed.
    async fn execute_insert(&mut self, table: &str, record: &Record) -> Result<(), ExecutionError>;

    /// Make pending row changes visible.
    async fn commit(&mut self) -> Result<(), ExecutionError>;

    /// Discard pending row changes.
    async fn rollback(&mut self) -> Result<(), ExecutionError>;
}

/// Source of connections (pool, tunnel, test double).
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    type Connection: SchemaConnection;

    /// Acquire a connection; dropping it releases it.
    async fn acquire(&self) -> Result<Self::Connection, ExecutionError>;
}
