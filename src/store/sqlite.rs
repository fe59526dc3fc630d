use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use serde_json::Value;

use super::keys::validate_key;
use super::schema::SCHEMA;
use super::{BatchOp, Store, WriteBatch};
use crate::error::{Error, Result};

pub struct SqliteStore {
    conn: Mutex<Connection>,
    capacity_bytes: Option<u64>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
            capacity_bytes: None,
        })
    }

    /// Caps the total size of stored values, like the browser cache this
    /// replaces. Writes that would exceed it fail without touching the store.
    #[must_use]
    pub fn with_capacity(mut self, capacity_bytes: u64) -> Self {
        self.capacity_bytes = Some(capacity_bytes);
        self
    }

    pub fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Total bytes of stored values.
    pub fn used_bytes(&self) -> Result<u64> {
        used_bytes(&self.conn())
    }

    fn commit_checked(&self, tx: Transaction<'_>) -> Result<()> {
        if let Some(capacity) = self.capacity_bytes {
            let used = used_bytes(&tx)?;
            if used > capacity {
                // Dropping the transaction rolls it back.
                return Err(Error::Storage(format!(
                    "capacity exceeded: {used} of {capacity} bytes"
                )));
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn used_bytes(conn: &Connection) -> Result<u64> {
    let used: i64 = conn.query_row(
        "SELECT COALESCE(SUM(LENGTH(CAST(value AS BLOB))), 0) FROM kv",
        [],
        |row| row.get(0),
    )?;
    Ok(used.max(0) as u64)
}

fn put(tx: &Transaction<'_>, key: &str, value: &Value) -> Result<()> {
    validate_key(key)?;
    tx.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, serde_json::to_string(value)?, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

fn delete(tx: &Transaction<'_>, key: &str) -> Result<bool> {
    let rows = tx.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
    Ok(rows > 0)
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let conn = self.conn();
        let raw: Option<String> = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        put(&tx, key, value)?;
        self.commit_checked(tx)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let removed = delete(&tx, key)?;
        tx.commit()?;
        Ok(removed)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn write_batch(&self, batch: &WriteBatch) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        for op in batch.ops() {
            match op {
                BatchOp::Put(key, value) => put(&tx, key, value)?,
                BatchOp::Delete(key) => {
                    delete(&tx, key)?;
                }
            }
        }

        self.commit_checked(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn open(temp: &TempDir) -> SqliteStore {
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        store
    }

    #[test]
    fn test_initialize_creates_kv_table() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(tables, vec!["kv".to_string()]);
    }

    #[test]
    fn test_get_set_remove() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);

        assert!(store.get("teams").unwrap().is_none());

        store.set("teams", &json!([{"team_number": 118}])).unwrap();
        assert_eq!(
            store.get("teams").unwrap(),
            Some(json!([{"team_number": 118}]))
        );

        store.set("teams", &json!([])).unwrap();
        assert_eq!(store.get("teams").unwrap(), Some(json!([])));

        assert!(store.remove("teams").unwrap());
        assert!(!store.remove("teams").unwrap());
        assert!(store.get("teams").unwrap().is_none());
    }

    #[test]
    fn test_keys_sorted() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);

        store.set("match_data", &json!([])).unwrap();
        store.set("app_settings", &json!({})).unwrap();

        assert_eq!(store.keys().unwrap(), vec!["app_settings", "match_data"]);
    }

    #[test]
    fn test_capacity_exceeded_leaves_store_unchanged() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp).with_capacity(32);

        store.set("small", &json!("abc")).unwrap();
        let err = store
            .set("big", &json!("x".repeat(64)))
            .unwrap_err();

        assert!(matches!(err, Error::Storage(_)));
        assert!(store.get("big").unwrap().is_none());
        assert_eq!(store.get("small").unwrap(), Some(json!("abc")));
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp).with_capacity(40);
        store.set("keep", &json!("value")).unwrap();

        let mut batch = WriteBatch::new();
        batch
            .delete("keep")
            .put("a", json!("short"))
            .put("b", json!("y".repeat(64)));

        assert!(store.write_batch(&batch).is_err());
        assert_eq!(store.get("keep").unwrap(), Some(json!("value")));
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);

        let err = store.set("", &json!(1)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
