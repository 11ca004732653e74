//! SQLite-backed key-value storage.

use super::{KeyValueStore, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value store over the `kv_entries` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKeyValueStore;
    use crate::store::KeyValueStore;

    #[test]
    fn put_overwrites_existing_key() {
        let store = SqliteKeyValueStore::open_in_memory().unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        store.put("k", "one").unwrap();
        store.put("k", "two").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        let rows: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
