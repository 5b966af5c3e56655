use lifecoach_core::db::migrations::{latest_version, schema_version};
use lifecoach_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "documents");
}

#[test]
fn reopening_a_database_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifecoach.db");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO documents (user_id, collection, doc_id, body) VALUES ('u', 'planners', 'p', '{}');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second).unwrap(), latest_version());
    let rows: i64 = second
        .query_row("SELECT COUNT(*) FROM documents;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn file_databases_use_wal_journaling() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("wal.db")).unwrap();
    let mode: String = conn
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_ascii_lowercase(), "wal");
}

#[test]
fn unknown_collections_are_rejected_by_schema() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO documents (user_id, collection, doc_id, body) VALUES ('u', 'notes', 'x', '{}');",
        [],
    );
    assert!(result.is_err());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
