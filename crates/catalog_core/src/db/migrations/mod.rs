//! Schema migrations for the catalog store.
//!
//! # Responsibility
//! - Hold the ordered list of schema steps shipped with this binary.
//! - Bring a connection from its recorded version up to the latest one.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly 1.
//! - The schema version lives in `PRAGMA user_version`, written inside the
//!   same transaction as the step that produced it.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "catalog_table",
    sql: include_str!("0001_catalog.sql"),
}];

/// Returns the schema version a fully migrated database reports.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Runs every step newer than the connection's recorded version.
///
/// Steps run in one transaction; on failure the recorded version is left
/// untouched.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is ahead of this binary.
/// - `Sqlite` when a step or the version write fails.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let mut pending = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from_version)
        .peekable();
    if pending.peek().is_none() {
        debug!("event=db_migrate module=db status=noop version={from_version}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        run_step(&tx, step)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> DbResult<()> {
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)?;
    debug!(
        "event=db_migrate_step module=db status=ok version={} name={}",
        step.version, step.name
    );
    Ok(())
}

pub(crate) fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?;
    Ok(version)
}
