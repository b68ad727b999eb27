//! # Classrank Observability
//!
//! Logging setup for the classrank binaries.
//!
//! Console output always goes to stderr so command output on stdout stays
//! machine-readable. When a log directory is configured, a daily-rolling
//! JSON file is written alongside.

mod basic_logging;

pub use basic_logging::{LoggingError, default_directives, init_logging};
