//! Synchronizer: the single public entry point of the engine.
//!
//! ```text
//! drop nulls → infer types → ensure table → reconcile → insert → commit
//! ```
//!
//! Validation (reserved names, type inference, case-only name clashes) runs before a connection is
//! acquired. Table creation and column additions are idempotent and stay in
//! place when a later step fails; the row itself only becomes visible on
//! commit.

use crate::connection::{ConnectionProvider, SchemaConnection};
use crate::error::SyncError;
use crate::insert::insert;
use crate::reconcile::{check_name_collisions, check_reserved, reconcile};
use crate::table::ensure_table;
use record_core::{Column, Record};
use tracing::{debug, warn};

/// Persist `record` as a new row of `table`, evolving the table as needed.
///
/// Returns the persisted fields: the record without its null fields.
pub async fn synchronize<P>(provider: &P, table: &str, record: Record) -> Result<Record, SyncError>
where
    P: ConnectionProvider + ?Sized,
{
    if table.is_empty() {
        return Err(SyncError::InvalidTableName {
            table: table.to_string(),
        });
    }

    // Checked on the full record so a null `id` is rejected too.
    check_reserved(record.iter().map(|(name, _)| name))?;

    let record = record.without_nulls();
    let columns = Column::from_record(&record)?;
    check_name_collisions(&columns)?;

    let mut conn = provider.acquire().await?;
    match write_record(&mut conn, table, &columns, &record).await {
        Ok(()) => {
            debug!(table, fields = record.len(), "Record synchronized");
            Ok(record)
        }
        Err(e) => {
            if let Err(rollback_err) = conn.rollback().await {
                warn!(table, error = %rollback_err, "Rollback after failed synchronization failed");
            }
            Err(e)
        }
    }
}

async fn write_record<C>(
    conn: &mut C,
    table: &str,
    columns: &[Column],
    record: &Record,
) -> Result<(), SyncError>
where
    C: SchemaConnection + ?Sized,
{
    ensure_table(conn, table).await?;
    reconcile(conn, table, columns).await?;
    insert(conn, table, record).await?;
    conn.commit().await?;
    Ok(())
}
