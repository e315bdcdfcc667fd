// ── File-backed key-value store ──

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::CoreError;

/// One `<key>.json` file per key inside a data directory.
///
/// Writes go to a sibling temp file that is then renamed over the
/// target, so a reader never sees a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::persistence(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CoreError::persistence(key, e))?;
        let target = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(|e| CoreError::persistence(key, e))?;
        std::fs::rename(&tmp, &target).map_err(|e| CoreError::persistence(key, e))
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(CoreError::persistence(key, e)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("hotspot_devices").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        store.set("hotspot_stats", "{\"a\":1}").unwrap();
        store.set("hotspot_stats", "{\"a\":2}").unwrap();
        assert_eq!(store.get("hotspot_stats").unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(store.path_for("hotspot_stats").exists());
        assert!(!store.dir().join(".hotspot_stats.json.tmp").exists());
    }

    #[test]
    fn clear_removes_known_keys_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("hotspot_config", "{}").unwrap();
        store.set("unrelated", "{}").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get("hotspot_config").unwrap(), None);
        assert!(store.get("unrelated").unwrap().is_some());
    }
}
