//! Durable storage for the point total.
//!
//! The engine only needs get/set of a string value under one key; which
//! backend provides it (browser LocalStorage, a save file, memory) is the
//! platform's choice. Storage is best-effort: the session's in-memory total
//! stays authoritative when a backend call fails.

use std::collections::HashMap;

use thiserror::Error;

/// Storage backend failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Narrow key-value contract the engine persists through.
pub trait PointsStore {
    /// Fetch the stored value for `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory backend (tests, throwaway sessions)
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed backend: one flat JSON object per save file.
///
/// An unreadable or corrupt file is logged and treated as empty; every set
/// rewrites the whole file.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
    entries: HashMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open a save file, creating it lazily on first write.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Corrupt save file {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                log::warn!("Could not read save file {}: {}", path.display(), e);
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Write(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PointsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// LocalStorage backend (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Read("LocalStorage unavailable".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl PointsStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Read(format!("get_item({}) failed", key)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::Write(format!("set_item({}) failed", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("points").unwrap(), None);
        store.set("points", "42").unwrap();
        assert_eq!(store.get("points").unwrap(), Some("42".to_string()));
        store.set("points", "43").unwrap();
        assert_eq!(store.get("points").unwrap(), Some("43".to_string()));
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!("tap_tycoon_rt_{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("points").unwrap(), None);
        store.set("points", "250").unwrap();

        // A fresh handle sees the flushed value
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("points").unwrap(), Some("250".to_string()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_file_store_corrupt_file_treated_as_empty() {
        let path = std::env::temp_dir().join(format!("tap_tycoon_bad_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("points").unwrap(), None);

        let _ = std::fs::remove_file(&path);
    }
}
