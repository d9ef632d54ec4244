//! Key-value store abstraction for locally persisted client state.
//!
//! The client keeps two durable values: the last credit-refill timestamp
//! (epoch milliseconds as a string) and the dark/light theme flag. Both go
//! through this trait so consumers never hard-wire a storage backend and
//! tests can run against an in-memory map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::AppError;

/// Key of the persisted last credit-refill timestamp (epoch ms, string).
pub const KEY_LAST_REFILL: &str = "last_refill_at";
/// Key of the persisted dark-mode preference ("true"/"false").
pub const KEY_DARK_MODE: &str = "dark_mode";

/// Durable string-keyed store for small client state.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: a single JSON object on disk, re-read on every get
/// and rewritten on every set. The state is a handful of keys, so whole
/// file rewrites are fine.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within one process.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<HashMap<String, String>, AppError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, map: &HashMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().unwrap();
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(KEY_LAST_REFILL).unwrap(), None);
        store.set(KEY_LAST_REFILL, "1700000000000").unwrap();
        assert_eq!(
            store.get(KEY_LAST_REFILL).unwrap().as_deref(),
            Some("1700000000000")
        );
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = FileStore::new(&path);

        assert_eq!(store.get(KEY_DARK_MODE).unwrap(), None);
        store.set(KEY_DARK_MODE, "true").unwrap();
        store.set(KEY_LAST_REFILL, "42").unwrap();

        // A fresh handle over the same file sees both keys.
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(KEY_DARK_MODE).unwrap().as_deref(), Some("true"));
        assert_eq!(reopened.get(KEY_LAST_REFILL).unwrap().as_deref(), Some("42"));
    }

    #[test]
    fn file_store_tolerates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(KEY_DARK_MODE).unwrap(), None);
    }
}
