//! JSON file backend.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use classrank_config::StoreConfig;
use classrank_models::Snapshot;
use tracing::{debug, info, instrument, warn};

use crate::{SnapshotStore, StoreError, report_integrity};

/// Stores the snapshot as one JSON document at `path`.
///
/// Saves go through a sibling `<file>.tmp` that is synced and then renamed
/// over the target.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.data_file.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "data.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read and parse the backing file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn try_load(&self) -> Result<Option<Snapshot>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let snapshot = serde_json::from_slice(&bytes)?;
        Ok(Some(snapshot))
    }

    fn write_atomically(&self, contents: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.temp_path();
        let result = (|| {
            let mut file = fs::File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
            file.write_all(contents)
                .map_err(|e| StoreError::io(&tmp, e))?;
            file.sync_all().map_err(|e| StoreError::io(&tmp, e))?;
            fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))
        })();

        if result.is_err() {
            // Leave the previous document untouched; only the scratch file goes.
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

impl SnapshotStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(Some(snapshot)) => {
                info!(
                    faculties = snapshot.faculties.len(),
                    students = snapshot.students.len(),
                    classes = snapshot.classes.len(),
                    "Loaded snapshot"
                );
                report_integrity(&snapshot, &self.location());
                snapshot
            }
            Ok(None) => {
                debug!("No data file yet, starting empty");
                Snapshot::new()
            }
            Err(e) => {
                warn!(error = %e, "Data file unreadable, starting empty");
                Snapshot::new()
            }
        }
    }

    #[instrument(skip(self, snapshot), fields(path = %self.path.display()))]
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut contents = serde_json::to_vec_pretty(snapshot)?;
        contents.push(b'\n');
        self.write_atomically(&contents)?;
        debug!(bytes = contents.len(), "Saved snapshot");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
