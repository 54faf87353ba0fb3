//! Session role state.
//!
//! The role lives in a single storage slot. [`SessionState`] is owned by the
//! application root and handed its storage explicitly; nothing reads the slot
//! behind its back.

use crate::storage::{SlotStorage, StorageResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Storage slot holding the active role.
pub const ROLE_KEY: &str = "amep_role";

/// Dashboard role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    /// Value written to the role slot.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }

    /// Parse a stored slot value.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "TEACHER" => Some(Role::Teacher),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn is_student(self) -> bool {
        self == Role::Student
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logged-in role, mirrored to a storage slot.
pub struct SessionState<S: SlotStorage> {
    storage: Arc<S>,
    role: Option<Role>,
}

impl<S: SlotStorage> SessionState<S> {
    /// Restore the session from storage. The slot is read exactly once here.
    ///
    /// Read failures and unrecognised values leave the session logged out.
    pub fn init(storage: Arc<S>) -> Self {
        let role = match storage.read(ROLE_KEY) {
            Ok(Some(value)) => {
                let role = Role::from_stored(&value);
                if role.is_none() {
                    log::warn!("Ignoring unrecognised stored role: {:?}", value);
                }
                role
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read stored role: {}", e);
                None
            }
        };

        if let Some(role) = role {
            log::info!("Restored session as {}", role);
        }
        Self { storage, role }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_logged_in(&self) -> bool {
        self.role.is_some()
    }

    /// Switch to `role` and persist it.
    ///
    /// The in-memory role changes even if the write fails.
    pub fn login(&mut self, role: Role) -> StorageResult<()> {
        self.role = Some(role);
        log::info!("Logged in as {}", role);
        self.storage.write(ROLE_KEY, role.as_str())
    }

    /// Log out and remove the persisted role.
    pub fn logout(&mut self) -> StorageResult<()> {
        if let Some(role) = self.role.take() {
            log::info!("Logged out of {} session", role);
        }
        self.storage.remove(ROLE_KEY)
    }

    /// End the session for good, clearing the slot.
    pub fn teardown(mut self) -> StorageResult<()> {
        self.logout()
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    /// Storage whose every operation fails.
    struct BrokenStorage;

    impl SlotStorage for BrokenStorage {
        fn read(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io("disk on fire".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io("disk on fire".to_string()))
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Io("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_starts_logged_out() {
        let session = SessionState::init(Arc::new(MemoryStorage::new()));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_login_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = SessionState::init(Arc::clone(&storage));
        session.login(Role::Student).unwrap();

        assert_eq!(storage.read(ROLE_KEY).unwrap().as_deref(), Some("STUDENT"));

        let restored = SessionState::init(storage);
        assert_eq!(restored.role(), Some(Role::Student));
    }

    #[test]
    fn test_logout_removes_slot() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = SessionState::init(Arc::clone(&storage));
        session.login(Role::Teacher).unwrap();
        session.logout().unwrap();

        assert_eq!(session.role(), None);
        assert_eq!(storage.read(ROLE_KEY).unwrap(), None);
    }

    #[test]
    fn test_teardown_clears_slot() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = SessionState::init(Arc::clone(&storage));
        session.login(Role::Teacher).unwrap();
        session.teardown().unwrap();
        assert_eq!(storage.read(ROLE_KEY).unwrap(), None);
    }

    #[test]
    fn test_unknown_stored_value_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(ROLE_KEY, "ADMIN").unwrap();
        let session = SessionState::init(storage);
        assert_eq!(session.role(), None);
    }

    #[test]
    fn test_read_failure_degrades_to_logged_out() {
        let mut session = SessionState::init(Arc::new(BrokenStorage));
        assert_eq!(session.role(), None);

        assert!(session.login(Role::Teacher).is_err());
        assert_eq!(session.role(), Some(Role::Teacher));
    }

    #[test]
    fn test_role_serde_matches_slot_values() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"TEACHER\"");
        assert_eq!(Role::from_stored("STUDENT\n"), Some(Role::Student));
        assert_eq!(Role::from_stored("student"), None);
    }
}
