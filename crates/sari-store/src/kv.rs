//! # Key-Value Blob Store
//!
//! The persistence substrate: whole-object JSON snapshots under string
//! keys. There is no schema migration and no partial update; every
//! write replaces the entire blob, and reading a missing key yields a
//! caller-supplied default.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            KvStore (trait: get / put / remove by key)                   │
//! │                    ▲                      ▲                             │
//! │                    │                      │                             │
//! │          ┌─────────┴────────┐   ┌─────────┴────────┐                    │
//! │          │  JsonFileStore   │   │   MemoryStore    │                    │
//! │          │  <dir>/<key>.json│   │  Mutex<HashMap>  │                    │
//! │          │  (production)    │   │  (test fake)     │                    │
//! │          └──────────────────┘   └──────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque strings to the trait; [`load_or`] and [`save`]
//! layer serde on top. Date fields round-trip as ISO-8601 strings via
//! chrono's serde support.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StoreResult;

// =============================================================================
// Storage Keys
// =============================================================================

/// Keys for the persisted collections, one blob each.
pub mod keys {
    pub const PRODUCTS: &str = "pos_products";
    pub const CATEGORIES: &str = "pos_categories";
    pub const SALES: &str = "pos_sales";
    pub const SETTINGS: &str = "pos_settings";
    pub const STOCK_ADJUSTMENTS: &str = "pos_stock_adjustments";
    pub const USERS: &str = "pos_users";
    pub const CURRENT_USER: &str = "pos_current_user";
    pub const HELD_TRANSACTIONS: &str = "pos_held_transactions";
}

// =============================================================================
// KvStore Trait
// =============================================================================

/// A private, unshared blob store addressed by string keys.
///
/// Single-writer by assumption: one running instance owns its store.
/// Methods take `&self` because the store is shared between the
/// per-collection stores; each implementation handles its own interior
/// mutability.
pub trait KvStore: Send + Sync {
    /// Reads the blob under `key`. `None` means the key was never
    /// written, which callers turn into their default value.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the entire blob under `key`.
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes the blob under `key`. Deleting a missing key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Loads and parses the blob under `key`, or produces the default when
/// the key has never been written.
pub fn load_or<T, F>(store: &dyn KvStore, key: &str, default: F) -> StoreResult<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw)?;
            debug!(key, "loaded blob");
            Ok(value)
        }
        None => {
            debug!(key, "key missing, using default");
            Ok(default())
        }
    }
}

/// Serializes `value` and replaces the blob under `key`.
pub fn save<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> StoreResult<()> {
    let raw = serde_json::to_string(value)?;
    store.put(key, &raw)?;
    debug!(key, bytes = raw.len(), "saved blob");
    Ok(())
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// File-backed store: one `<key>.json` file per key under a directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (creating if needed) a store directory.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(JsonFileStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store, the test fake. Also useful for ephemeral demo
/// sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Blob {
        label: String,
        count: u32,
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.put("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        // Removing again is a no-op.
        store.remove("k").unwrap();
    }

    #[test]
    fn test_load_or_uses_default_for_missing_key() {
        let store = MemoryStore::new();
        let blob: Blob = load_or(&store, "missing", || Blob {
            label: "default".to_string(),
            count: 0,
        })
        .unwrap();
        assert_eq!(blob.label, "default");
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let blob = Blob {
            label: "hello".to_string(),
            count: 7,
        };
        save(&store, "blob", &blob).unwrap();

        let loaded: Blob = load_or(&store, "blob", || unreachable!()).unwrap();
        assert_eq!(loaded, blob);
    }

    #[test]
    fn test_save_replaces_whole_blob() {
        let store = MemoryStore::new();
        save(&store, "k", &vec![1, 2, 3]).unwrap();
        save(&store, "k", &vec![9]).unwrap();

        let loaded: Vec<i32> = load_or(&store, "k", Vec::new).unwrap();
        assert_eq!(loaded, vec![9]);
    }

    #[test]
    fn test_load_or_rejects_corrupt_blob() {
        let store = MemoryStore::new();
        store.put("k", "{not json").unwrap();
        let result: StoreResult<Blob> = load_or(&store, "k", || unreachable!());
        assert!(result.is_err());
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("pos_products").unwrap(), None);
        store.put("pos_products", "[]").unwrap();
        assert_eq!(store.get("pos_products").unwrap().as_deref(), Some("[]"));

        // A second store over the same directory sees the data.
        let reopened = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("pos_products").unwrap().as_deref(), Some("[]"));

        store.remove("pos_products").unwrap();
        assert_eq!(store.get("pos_products").unwrap(), None);
    }
}
