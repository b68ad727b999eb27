//! # Classrank Config
//!
//! Configuration types for classrank.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`store`]: Location of the backing data file
//! - [`logging`]: Log level, optional log directory and output format
//!
//! # Example
//!
//! ```ignore
//! use classrank_config::AppConfig;
//!
//! // Load all configs from environment
//! let config = AppConfig::from_env();
//! println!("data file: {}", config.store.data_file.display());
//! ```

pub mod logging;
pub mod store;

// Re-export commonly used types at crate root
pub use logging::LoggingConfig;
pub use store::StoreConfig;

/// All configuration for one process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            store: StoreConfig::from_lookup(&lookup),
            logging: LoggingConfig::from_lookup(&lookup),
        }
    }
}
