//! JSON file-backed blob store.
//!
//! Persists the whole keyspace as a single JSON object under the app's base
//! directory. Writes go through a temp file and an atomic rename so a crash
//! mid-write cannot corrupt existing entries. This is the development and
//! headless-client backend; on device the shell provides the keychain.

use crate::{SecureBlobStore, StoreError, StoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// File-backed [`SecureBlobStore`].
pub struct FileBlobStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the backing file.
    lock: Mutex<()>,
}

impl FileBlobStore {
    /// Create a store backed by the given file. The file is created lazily
    /// on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|err| StoreError::Corrupt {
                    key: self.path.display().to_string(),
                    reason: err.to_string(),
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|err| StoreError::Backend(format!("serialize store: {err}")))?;

        // Write to a temp file, then rename into place.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), entries = entries.len(), "persisted blob store");
        Ok(())
    }
}

impl SecureBlobStore for FileBlobStore {
    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().unwrap();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.load()?.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock().unwrap();
        let mut entries = self.load()?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.persist(&entries)?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileBlobStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path().join("tokens.json"));
        (dir, store)
    }

    #[test]
    fn round_trip_survives_reopen() {
        let (dir, store) = temp_store();
        store.set("__session", "abc.def.ghi").unwrap();

        let reopened = FileBlobStore::new(dir.path().join("tokens.json"));
        assert_eq!(
            reopened.get("__session").unwrap(),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn get_before_first_write_is_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn delete_removes_entry() {
        let (_dir, store) = temp_store();
        store.set("k", "v").unwrap();
        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn corrupt_file_reports_corrupt_not_transient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileBlobStore::new(&path);
        let err = store.get("k").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn overwrite_replaces_value() {
        let (_dir, store) = temp_store();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("second".to_string()));
    }
}
