//! Key-value slot storage for small pieces of session state.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A store of named string slots (the shape of browser local storage).
pub trait SlotStorage: Send + Sync {
    /// Read a slot. Absent slots are `Ok(None)`.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a slot, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a slot. Removing an absent slot succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
