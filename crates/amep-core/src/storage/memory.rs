//! In-memory slot storage.

use super::{SlotStorage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let slots = self.slots.read().map_err(lock_error)?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut slots = self.slots.write().map_err(lock_error)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut slots = self.slots.write().map_err(lock_error)?;
        slots.remove(key);
        Ok(())
    }
}
