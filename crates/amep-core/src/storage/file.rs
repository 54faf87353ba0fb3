//! File-based slot storage for native platforms.

use super::{SlotStorage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each slot as a small text file in a directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_path`, creating it if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/amep/session/`
    /// On Windows: `%LOCALAPPDATA%\amep\session\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("amep").join("session"))
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.slot", safe_key))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl SlotStorage for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key);
        fs::write(&path, value)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.write("amep_role", "TEACHER").unwrap();
        assert!(dir.path().join("amep_role.slot").exists());
        assert_eq!(storage.read("amep_role").unwrap().as_deref(), Some("TEACHER"));

        storage.remove("amep_role").unwrap();
        assert_eq!(storage.read("amep_role").unwrap(), None);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[test]
    fn test_key_is_sanitized() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.write("../escape", "x").unwrap();
        assert!(dir.path().join("___escape.slot").exists());
    }
}
