//! File and in-memory connection setup.
//!
//! # Responsibility
//! - Open connections and set the pragmas the document store relies on.
//! - Run pending migrations before returning.
//!
//! # Invariants
//! - File databases use WAL journaling.
//! - Returned connections have `foreign_keys=ON` and the latest schema.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the database file at `path`, switches it to
/// WAL journaling and brings the schema up to date.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    connect("file", || {
        let conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        Ok(conn)
    })
}

/// Private in-memory database with the current schema. Gone on drop.
pub fn open_db_in_memory() -> DbResult<Connection> {
    connect("memory", || Ok(Connection::open_in_memory()?))
}

fn connect(
    target: &'static str,
    open: impl FnOnce() -> DbResult<Connection>,
) -> DbResult<Connection> {
    let started = Instant::now();
    let result = open().and_then(|mut conn| {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    let elapsed_ms = started.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok target={target} duration_ms={elapsed_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error target={target} duration_ms={elapsed_ms} error={err}"
        ),
    }
    result
}
