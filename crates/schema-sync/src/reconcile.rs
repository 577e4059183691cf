//! Schema diffing and evolution.
//!
//! The live schema is read fresh on every call. Desired columns that already
//! exist must have a compatible base type; the rest are added in one
//! `ALTER TABLE` statement. Columns are never dropped, renamed or retyped.

use crate::connection::SchemaConnection;
use crate::error::{ExecutionError, SyncError};
use mysql_types::is_compatible;
use record_core::{is_reserved, Column, TableSchema};
use tracing::{debug, info, warn};

/// How many times the evolution statement is issued before a
/// duplicate-column race is reported as an error.
pub const MAX_EVOLUTION_ATTEMPTS: usize = 3;

/// Fail on the first reserved name, in iteration order.
pub fn check_reserved<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<(), SyncError> {
    match names.into_iter().find(|name| is_reserved(name)) {
        Some(name) => Err(SyncError::ReservedColumn {
            column: name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Fail when two desired columns differ only in case.
///
/// MySQL would reject the pair as duplicate column names on every attempt.
pub fn check_name_collisions(desired: &[Column]) -> Result<(), SyncError> {
    for (i, column) in desired.iter().enumerate() {
        if let Some(other) = desired[..i]
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(&column.name))
        {
            return Err(SyncError::ColumnNameCollision {
                column: other.name.clone(),
                other: column.name.clone(),
            });
        }
    }
    Ok(())
}

/// Compare desired columns with the live schema.
///
/// Returns the columns that must be added, in desired order. Live columns
/// are matched ignoring case. The first desired column whose base type
/// disagrees with the live one fails the whole plan.
pub fn plan_evolution(live: &TableSchema, desired: &[Column]) -> Result<Vec<Column>, SyncError> {
    let mut missing = Vec::new();

    for column in desired {
        match live.get(&column.name) {
            Some(existing) => {
                if !is_compatible(&existing.declared_type, &column.column_type) {
                    return Err(SyncError::TypeConflict {
                        column: column.name.clone(),
                        desired: column.column_type.tag(),
                        existing: existing.declared_type.clone(),
                    });
                }
            }
            None => missing.push(column.clone()),
        }
    }

    Ok(missing)
}

/// Bring the live schema of `table` up to the desired column set.
///
/// Issues no schema-altering statement when every desired column exists.
/// When another writer adds one of the missing columns first, the live
/// schema is re-read and only what is still missing is added again.
pub async fn reconcile<C>(conn: &mut C, table: &str, desired: &[Column]) -> Result<(), SyncError>
where
    C: SchemaConnection + ?Sized,
{
    check_reserved(desired.iter().map(|c| c.name.as_str()))?;
    check_name_collisions(desired)?;

    let mut attempt = 1;
    loop {
        let live = conn.describe_table(table).await?;
        let missing = plan_evolution(&live, desired)?;

        if missing.is_empty() {
            debug!(table, "Schema already up to date");
            return Ok(());
        }

        let names: Vec<&str> = missing.iter().map(|c| c.name.as_str()).collect();
        match conn.add_columns(table, &missing).await {
            Ok(()) => {
                info!(table, columns = ?names, "Added columns");
                return Ok(());
            }
            Err(ExecutionError::DuplicateColumn { column }) if attempt < MAX_EVOLUTION_ATTEMPTS => {
                warn!(
                    table,
                    column = %column,
                    attempt,
                    "Column was added concurrently, re-reading schema"
                );
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
