//! # Classrank Store
//!
//! Snapshot persistence for classrank.
//!
//! The whole record set is read once at startup and rewritten in full after
//! every mutation. Two backends implement the [`SnapshotStore`] seam:
//!
//! - [`JsonFileStore`]: a single pretty-printed JSON document on disk
//! - [`MemoryStore`]: an in-process copy, used by tests and dry runs
//!
//! # Example
//!
//! ```ignore
//! use classrank_store::{JsonFileStore, SnapshotStore};
//!
//! let store = JsonFileStore::new("data.json");
//!
//! // Never fails: a missing or corrupt file yields an empty snapshot.
//! let mut snapshot = store.load();
//!
//! // Atomic: either the old or the new document is on disk afterwards.
//! store.save(&snapshot)?;
//! ```

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use classrank_models::Snapshot;
use std::path::PathBuf;

/// Abstract trait for snapshot storage backends.
pub trait SnapshotStore: Send + Sync {
    /// Read the persisted snapshot.
    ///
    /// Missing or unreadable data is not an error: the backend returns an
    /// empty snapshot and logs why.
    fn load(&self) -> Snapshot;

    /// Replace the persisted snapshot with `snapshot` in one step.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Human-readable location, used in log lines and CLI output.
    fn location(&self) -> String;
}

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Outcome of persisting a snapshot after a successful mutation.
///
/// A failed save does not undo the mutation: the in-memory snapshot stays
/// authoritative for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum SaveStatus {
    Saved,
    Failed(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// The failure reason, if durability was not achieved.
    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::Saved => None,
            Self::Failed(reason) => Some(reason.as_str()),
        }
    }
}

impl From<Result<(), StoreError>> for SaveStatus {
    fn from(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Self::Saved,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Log every referential inconsistency found in a freshly loaded snapshot.
pub(crate) fn report_integrity(snapshot: &Snapshot, location: &str) {
    for issue in snapshot.integrity_issues() {
        tracing::warn!(store = %location, issue = %issue, "Loaded snapshot is inconsistent");
    }
}
