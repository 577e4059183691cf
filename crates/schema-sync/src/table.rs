//! Table initialization.

use crate::connection::SchemaConnection;
use crate::error::SyncError;
use tracing::debug;

/// Make sure `table` exists with its reserved `id` and `created` columns.
///
/// Idempotent; existing tables are left untouched and no column comparison
/// happens here.
pub async fn ensure_table<C>(conn: &mut C, table: &str) -> Result<(), SyncError>
where
    C: SchemaConnection + ?Sized,
{
    if table.is_empty() {
        return Err(SyncError::InvalidTableName {
            table: table.to_string(),
        });
    }

    debug!(table, "Ensuring table exists");
    conn.create_table_if_absent(table).await?;
    Ok(())
}
