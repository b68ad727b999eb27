//! Data file configuration.
//!
//! # Configuration
//!
//! - `CLASSRANK_DATA_FILE`: Path of the JSON snapshot (default: `data.json`)

use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Where the snapshot lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl StoreConfig {
    /// Creates a new `StoreConfig` from environment variables.
    ///
    /// Falls back to `data.json` in the working directory if unset or blank.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            data_file: lookup("CLASSRANK_DATA_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        }
    }

    /// Override the data file, e.g. from a command-line flag.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }
}
