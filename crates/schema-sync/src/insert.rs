//! Row insertion.

use crate::connection::SchemaConnection;
use crate::error::SyncError;
use crate::reconcile::check_reserved;
use record_core::Record;
use tracing::debug;

/// Insert `record` as one row of `table` without committing.
///
/// Every field is listed and every value is bound as a parameter. Reserved
/// columns are never listed; the table fills them with its defaults.
pub async fn insert<C>(conn: &mut C, table: &str, record: &Record) -> Result<(), SyncError>
where
    C: SchemaConnection + ?Sized,
{
    check_reserved(record.iter().map(|(name, _)| name))?;

    debug!(table, fields = ?record.field_names(), "Inserting row");
    conn.execute_insert(table, record).await?;
    Ok(())
}
