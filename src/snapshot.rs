//! The key-value persistence layer that `FinanceStore` snapshots itself into.
//!
//! A snapshot is two independent string entries, `transactions` and `categories`, each holding a
//! JSON array. The layout is the same as the one the browser version of the tracker kept in
//! `localStorage`, so such a snapshot can be dropped into a `FileStore` directory and loaded.

use crate::{utils, Result};
use anyhow::bail;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::trace;

/// The snapshot key that holds the transactions array.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// The snapshot key that holds the categories array.
pub const CATEGORIES_KEY: &str = "categories";

/// A synchronous string-to-string store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if nothing has been stored there.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `{key}.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates `dir` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        utils::make_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds `key`.
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        utils::read_if_exists(&self.path(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key);
        // Write beside the target, then rename, so a crash never leaves half a snapshot
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        utils::write(&tmp, value)?;
        utils::rename(&tmp, &path)?;
        trace!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// An in-process store. Useful for tests and for embedding the tracker without a disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `true`, every subsequent `set` fails without storing anything.
    pub fn set_fail_writes(&mut self, fail_writes: bool) {
        self.fail_writes = fail_writes;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            bail!("Unable to write '{key}': the store is refusing writes")
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data")).unwrap();
        assert!(store.dir().is_dir());
        assert!(store.get(TRANSACTIONS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_store_set_and_get() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path()).unwrap();
        store.set(CATEGORIES_KEY, "[1]").unwrap();
        store.set(CATEGORIES_KEY, "[1,2]").unwrap();
        assert_eq!(store.get(CATEGORIES_KEY).unwrap().as_deref(), Some("[1,2]"));
        assert!(store.path(CATEGORIES_KEY).is_file());
        assert!(!dir.path().join(".categories.json.tmp").exists());
    }

    #[test]
    fn test_file_store_unreadable_key_is_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        // A directory where the file should be cannot be read as a string
        std::fs::create_dir_all(store.path(TRANSACTIONS_KEY)).unwrap();
        assert!(store.get(TRANSACTIONS_KEY).is_err());
    }

    #[test]
    fn test_memory_store_fail_writes() {
        let mut store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set_fail_writes(true);
        assert!(store.set("a", "2").is_err());
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.len(), 1);
    }
}
