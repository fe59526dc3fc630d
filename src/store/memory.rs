use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;

use super::keys::validate_key;
use super::{BatchOp, Store, WriteBatch};
use crate::error::{Error, Result};

/// In-memory [`Store`] with the same capacity rules as [`super::SqliteStore`].
///
/// `fail_writes` makes every write return a storage error, which lets tests
/// check that nothing observable changes when persistence fails.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    capacity_bytes: Option<u64>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity_bytes: u64) -> Self {
        self.capacity_bytes = Some(capacity_bytes);
        self
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn apply(&self, ops: &[BatchOp]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage("write rejected by store".to_string()));
        }

        let mut entries = self.entries();
        let mut next = entries.clone();

        for op in ops {
            match op {
                BatchOp::Put(key, value) => {
                    validate_key(key)?;
                    next.insert(key.clone(), serde_json::to_string(value)?);
                }
                BatchOp::Delete(key) => {
                    next.remove(key);
                }
            }
        }

        if let Some(capacity) = self.capacity_bytes {
            let used: u64 = next.values().map(|v| v.len() as u64).sum();
            if used > capacity {
                return Err(Error::Storage(format!(
                    "capacity exceeded: {used} of {capacity} bytes"
                )));
            }
        }

        *entries = next;
        Ok(())
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.entries().get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        self.apply(&[BatchOp::Put(key.to_string(), value.clone())])
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let existed = self.entries().contains_key(key);
        self.apply(&[BatchOp::Delete(key.to_string())])?;
        Ok(existed)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries().keys().cloned().collect())
    }

    fn write_batch(&self, batch: &WriteBatch) -> Result<()> {
        self.apply(batch.ops())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failing_writes_leave_entries_untouched() {
        let store = MemoryStore::new();
        store.set("teams", &json!([1])).unwrap();

        store.fail_writes(true);
        assert!(matches!(
            store.set("teams", &json!([2])),
            Err(Error::Storage(_))
        ));
        assert!(store.remove("teams").is_err());
        assert_eq!(store.get("teams").unwrap(), Some(json!([1])));
    }

    #[test]
    fn test_capacity_counts_serialized_bytes() {
        let store = MemoryStore::new().with_capacity(10);
        store.set("a", &json!("12345678")).unwrap();
        assert!(store.set("b", &json!("x")).is_err());
        assert_eq!(store.keys().unwrap(), vec!["a"]);
    }
}
