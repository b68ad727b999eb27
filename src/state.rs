use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use classrank_config::StoreConfig;
use classrank_models::Snapshot;
use classrank_store::{JsonFileStore, SaveStatus, SnapshotStore};

/// The session-long record set and the store it is persisted to.
///
/// Loaded once at startup; every successful mutation rewrites the whole
/// snapshot through [`AppState::commit`].
pub struct AppState {
    pub(crate) store: Box<dyn SnapshotStore>,
    pub(crate) snapshot: Snapshot,
    pub(crate) rng: StdRng,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.location())
            .field("faculties", &self.snapshot.faculties.len())
            .field("students", &self.snapshot.students.len())
            .field("classes", &self.snapshot.classes.len())
            .finish_non_exhaustive()
    }
}

/// A mutation that was applied in memory, with the outcome of persisting it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Committed<T> {
    pub value: T,
    pub save: SaveStatus,
}

impl<T> Committed<T> {
    pub fn is_durable(&self) -> bool {
        self.save.is_saved()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl AppState {
    /// Load the snapshot from `store`, seeding identifiers from OS entropy.
    pub fn open(store: impl SnapshotStore + 'static) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Like [`AppState::open`] with an explicit random source.
    pub fn with_rng(store: impl SnapshotStore + 'static, rng: StdRng) -> Self {
        let snapshot = store.load();
        Self {
            store: Box::new(store),
            snapshot,
            rng,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn store_location(&self) -> String {
        self.store.location()
    }

    /// Persist the current snapshot and wrap `value` with the outcome.
    pub(crate) fn commit<T>(&mut self, value: T) -> Committed<T> {
        let save = SaveStatus::from(self.store.save(&self.snapshot));
        if let SaveStatus::Failed(reason) = &save {
            warn!(
                store = %self.store.location(),
                reason = %reason,
                "Snapshot not persisted; continuing with in-memory state"
            );
        }
        Committed { value, save }
    }
}

/// Open the JSON file store described by `config`.
pub fn init_app_state(config: &StoreConfig) -> AppState {
    AppState::open(JsonFileStore::from_config(config))
}
