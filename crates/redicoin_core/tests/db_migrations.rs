use redicoin_core::db::migrations::latest_version;
use redicoin_core::db::{open_db, open_db_in_memory};
use redicoin_core::{SqliteKeyValueStore, StoreError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(table_exists(&conn, "kv_entries"));
}

#[test]
fn opening_same_file_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("redicoin.db");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO kv_entries (key, value) VALUES ('k', 'v');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let value: String = second
        .query_row("SELECT value FROM kv_entries WHERE key = 'k';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(value, "v");
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        StoreError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_store_reports_newer_schema_as_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future_store.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 7;").unwrap();
    drop(conn);

    let err = SqliteKeyValueStore::open(&path).err().unwrap();
    assert!(matches!(
        err,
        StoreError::SchemaTooNew {
            found: 7,
            supported: 1
        }
    ));
    assert!(err.to_string().contains("schema version 7"));
}

#[test]
fn sqlite_failures_keep_their_source() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_db(dir.path().join("missing").join("redicoin.db")).unwrap_err();

    assert!(matches!(err, StoreError::Sqlite(_)));
    assert!(std::error::Error::source(&err).is_some());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [table_name],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        == 1
}
