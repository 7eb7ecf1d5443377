// src/storage/file.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DemoError, Result};
use crate::storage::SessionStorage;

const MARKER_FILE_NAME: &str = ".dealease-demo";

/// A storage backend that persists session records to the file system.
///
/// Each key is stored as `base_path/<key>.json`. Writes go to a temporary
/// sibling first and are renamed into place, so a crash mid-write leaves the
/// previous record intact.
#[derive(Debug)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Creates a new `FileStorage` instance.
    ///
    /// This will create the base directory and a marker file (`.dealease-demo`)
    /// if they don't already exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The directory where session records will be stored.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        fs::create_dir_all(&path).map_err(|e| {
            DemoError::persistence(format!("Failed to create base path '{}': {}", path.display(), e))
        })?;

        let marker_path = path.join(MARKER_FILE_NAME);
        if !marker_path.exists() {
            fs::File::create(&marker_path).map_err(|e| {
                DemoError::persistence(format!(
                    "Failed to create marker file '{}': {}",
                    marker_path.display(),
                    e
                ))
            })?;
        }

        Ok(Self { base_path: path })
    }

    /// The directory records are stored in.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path: `base_path/<key>.json`
    fn record_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(DemoError::persistence(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl SessionStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DemoError::persistence(format!(
                "Failed to read record '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(|e| {
            DemoError::persistence(format!("Failed to write record '{}': {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            DemoError::persistence(format!("Failed to move record into '{}': {}", path.display(), e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_file_storage() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.is_ok());
        assert!(dir.path().join(MARKER_FILE_NAME).exists());
    }

    #[test]
    fn test_write_and_read_record() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.write("dealease-demo-session", "{\"isActive\":false}").unwrap();
        assert_eq!(
            storage.read("dealease-demo-session").unwrap().as_deref(),
            Some("{\"isActive\":false}")
        );
        assert!(!dir.path().join("dealease-demo-session.json.tmp").exists());
    }

    #[test]
    fn test_read_missing_record() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert_eq!(storage.read("absent").unwrap(), None);
    }

    #[test]
    fn test_overwrite_replaces_record() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.write("k", "one").unwrap();
        storage.write("k", "two").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("two"));
        assert!(!dir.path().join("k.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert!(matches!(storage.write("../escape", "x"), Err(DemoError::PersistenceFailure(_))));
        assert!(storage.read("").is_err());
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        FileStorage::new(dir.path()).unwrap().write("k", "persisted").unwrap();
        let reopened = FileStorage::new(dir.path()).unwrap();
        assert_eq!(reopened.read("k").unwrap().as_deref(), Some("persisted"));
    }
}
