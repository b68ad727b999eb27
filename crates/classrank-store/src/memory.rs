//! In-memory backend.

use std::sync::Mutex;

use classrank_models::Snapshot;

use crate::{SnapshotStore, StoreError};

/// Keeps the last saved snapshot in process memory.
///
/// `failing()` builds a store whose saves always error, which lets callers
/// exercise the non-fatal persistence path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<Snapshot>>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: Mutex::new(Some(snapshot)),
            fail_saves: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            saved: Mutex::new(None),
            fail_saves: true,
        }
    }

    /// The last successfully saved snapshot, if any.
    pub fn saved(&self) -> Option<Snapshot> {
        self.saved
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Snapshot {
        self.saved().unwrap_or_default()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Unavailable("memory store rejects writes".into()));
        }
        let mut guard = self
            .saved
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        *guard = Some(snapshot.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classrank_models::{Faculty, Username};

    #[test]
    fn test_empty_store_loads_default() {
        let store = MemoryStore::new();
        assert!(store.load().is_empty());
        assert!(store.saved().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let mut snapshot = Snapshot::new();
        snapshot
            .faculties
            .insert(Username::new("alice"), Faculty::default());

        store.save(&snapshot).unwrap();
        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn test_failing_store() {
        let store = MemoryStore::failing();
        assert!(store.save(&Snapshot::new()).is_err());
        assert!(store.saved().is_none());
    }
}
