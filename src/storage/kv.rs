//! Durable key-value blob stores
//!
//! Values are whole strings; there are no partial writes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A string key-value store
pub trait KeyValueStore {
    /// Read a value, `None` if the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One file per key inside a directory.
///
/// Writes land in a temporary sibling and are renamed over the target, so a
/// crash mid-write leaves the previous value in place.
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Create the store directory if needed
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers, but keep them inside the directory
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.init()?;
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = FileKeyValueStore::new(temp.path().join("data"));

        assert_eq!(store.get("flashCardsData").unwrap(), None);
        store.set("flashCardsData", "[]").unwrap();
        assert_eq!(store.get("flashCardsData").unwrap().as_deref(), Some("[]"));

        store.set("flashCardsData", "[1]").unwrap();
        assert_eq!(store.get("flashCardsData").unwrap().as_deref(), Some("[1]"));
        assert!(!temp.path().join("data/flashCardsData.json.tmp").exists());
    }

    #[test]
    fn test_file_store_remove() {
        let temp = TempDir::new().unwrap();
        let mut store = FileKeyValueStore::new(temp.path().to_path_buf());
        store.set("key", "value").unwrap();
        store.remove("key").unwrap();
        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
    }

    #[test]
    fn test_file_store_keeps_keys_inside_directory() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path().to_path_buf());
        let path = store.key_path("../escape");
        assert_eq!(path.parent(), Some(temp.path()));
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryKeyValueStore::new();
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }
}
