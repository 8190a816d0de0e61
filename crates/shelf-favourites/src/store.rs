//! `LocalStore` backends.
//!
//! `FileStore` keeps one `<key>.json` file per key. Writes go to a temp file in
//! the same directory, are synced, and then renamed over the old entry, so a
//! reader sees either the previous value or the new one.
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use shelf_core::config::validate_store_key;
use shelf_core::{Error, LocalStore, Result};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_store_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(persistence(&path, &e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| persistence(&self.dir, &e))?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| persistence(&self.dir, &e))?;
        tmp.write_all(value.as_bytes()).map_err(|e| persistence(tmp.path(), &e))?;
        tmp.as_file().sync_all().map_err(|e| persistence(tmp.path(), &e))?;
        tmp.persist(&path).map_err(|e| persistence(&path, &e.error))?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "store entry written");
        Ok(())
    }
}

fn persistence(path: &Path, e: &std::io::Error) -> Error { Error::FavouritesPersistence(format!("{}: {e}", path.display())) }

/// In-process store; contents die with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> { Ok(self.entries.get(key).cloned()) }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip_and_overwrite() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join("nested"));
        assert_eq!(store.get("favourites").unwrap(), None);
        store.set("favourites", "[1]").unwrap();
        store.set("favourites", "[1,2]").unwrap();
        assert_eq!(store.get("favourites").unwrap().as_deref(), Some("[1,2]"));
        assert!(tmp.path().join("nested/favourites.json").is_file());
        let leftovers = fs::read_dir(tmp.path().join("nested")).unwrap().count();
        assert_eq!(leftovers, 1, "temp files are renamed away");
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path());
        assert!(store.set("../outside", "x").is_err());
        assert!(store.get("a/b").is_err());
    }

    #[test]
    fn unreadable_entry_is_a_persistence_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("favourites.json")).unwrap();
        let store = FileStore::new(tmp.path());
        assert!(matches!(store.get("favourites"), Err(Error::FavouritesPersistence(_))));
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::with_entry("a", "1");
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("b").unwrap(), None);
    }
}
