//! Schema scripts, applied in version order and recorded in
//! `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

/// `(version, script)` pairs; versions start at 1 and increase by one.
const SCRIPTS: &[(u32, &str)] = &[(1, include_str!("0001_documents.sql"))];

pub fn latest_version() -> u32 {
    SCRIPTS.last().map_or(0, |(version, _)| *version)
}

/// Schema version currently recorded in the database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Runs every script newer than the recorded version inside one
/// transaction.
///
/// # Errors
/// - [`DbError::SchemaTooNew`] when the file is ahead of this build.
/// - [`DbError::Migration`] naming the failing script; the transaction is
///   rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending: Vec<_> = SCRIPTS
        .iter()
        .filter(|(version, _)| *version > found)
        .collect();
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=skip version={found}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, script) in pending {
        tx.execute_batch(script)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration {
                version: *version,
                source,
            })?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from={found} to={supported}");
    Ok(())
}
