//! Whole-store export, import and cache maintenance.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{Error, Result};
use crate::store::keys::{APP_SETTINGS, parse_strategy_key};
use crate::store::{Store, WriteBatch};

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size with at most two decimals, e.g. `1.5 KB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{rendered} {}", UNITS[unit])
}

pub fn default_export_name(date: NaiveDate) -> String {
    format!("scoutbook_export_{}.json", date.format("%Y-%m-%d"))
}

/// Every stored key and its value, as one JSON object.
pub fn export_dump(store: &dyn Store) -> Result<Value> {
    let mut dump = Map::new();
    for key in store.keys()? {
        if let Some(value) = store.get(&key)? {
            dump.insert(key, value);
        }
    }

    info!(keys = dump.len(), "store exported");
    Ok(Value::Object(dump))
}

/// Writes every key of `dump` as-is, replacing existing values. Values are
/// not checked against any schema.
pub fn import_dump(store: &dyn Store, dump: &Value) -> Result<usize> {
    let entries = dump
        .as_object()
        .ok_or_else(|| Error::validation("import file must contain a JSON object"))?;

    let mut batch = WriteBatch::new();
    for (key, value) in entries {
        batch.put(key.as_str(), value.clone());
    }
    store.write_batch(&batch)?;

    info!(keys = entries.len(), "store imported");
    Ok(entries.len())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    pub key: String,
    pub bytes: u64,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_number: Option<u32>,
}

/// Stored keys other than the settings, with their serialized size.
pub fn inventory(store: &dyn Store) -> Result<Vec<CacheEntry>> {
    let mut entries = Vec::new();
    for key in store.keys()? {
        if key == APP_SETTINGS {
            continue;
        }
        let Some(value) = store.get(&key)? else {
            continue;
        };
        let bytes = serde_json::to_string(&value)?.len() as u64;
        entries.push(CacheEntry {
            team_number: parse_strategy_key(&key),
            size: format_bytes(bytes),
            bytes,
            key,
        });
    }
    Ok(entries)
}

/// Removes all data except the settings. Returns how many keys were removed.
pub fn clear_all(store: &dyn Store) -> Result<usize> {
    let mut batch = WriteBatch::new();
    let mut removed = 0;
    for key in store.keys()? {
        if key != APP_SETTINGS {
            batch.delete(key);
            removed += 1;
        }
    }
    store.write_batch(&batch)?;

    info!(removed, "cached data cleared");
    Ok(removed)
}

pub fn delete_key(store: &dyn Store, key: &str) -> Result<()> {
    if !store.remove(key)? {
        return Err(Error::not_found(format!("key '{key}'")));
    }
    info!(key, "cached key deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.set("teams", &json!([{"team_number": 118}])).unwrap();
        store.set("strategy_118", &json!({"notes": "x"})).unwrap();
        store.set(APP_SETTINGS, &json!({"year": 2025})).unwrap();
        store
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(500), "500 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_bytes(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_export_then_import_into_empty_store() {
        let source = seeded();
        let dump = export_dump(&source).unwrap();
        assert_eq!(dump["teams"][0]["team_number"], 118);

        let target = MemoryStore::new();
        assert_eq!(import_dump(&target, &dump).unwrap(), 3);
        assert_eq!(export_dump(&target).unwrap(), dump);
    }

    #[test]
    fn test_import_requires_object() {
        let store = MemoryStore::new();
        assert!(matches!(
            import_dump(&store, &json!([1, 2])),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_inventory_skips_settings() {
        let store = seeded();
        let entries = inventory(&store).unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["strategy_118", "teams"]);
        assert_eq!(entries[0].team_number, Some(118));
        assert_eq!(entries[0].bytes, r#"{"notes":"x"}"#.len() as u64);
    }

    #[test]
    fn test_clear_all_keeps_settings() {
        let store = seeded();
        assert_eq!(clear_all(&store).unwrap(), 2);
        assert_eq!(store.keys().unwrap(), vec![APP_SETTINGS.to_string()]);
    }

    #[test]
    fn test_delete_key() {
        let store = seeded();
        delete_key(&store, "teams").unwrap();
        assert!(matches!(
            delete_key(&store, "teams"),
            Err(Error::NotFound(_))
        ));
    }
}
