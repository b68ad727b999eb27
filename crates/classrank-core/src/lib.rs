//! # Classrank Core
//!
//! Core types, errors, and utilities for classrank.
//!
//! This crate provides foundational pieces used throughout the application:
//!
//! - [`errors`]: Record validation error kinds surfaced to the presentation layer
//! - [`credentials`]: Student/class identifier and temporary password generation
//! - [`serde`]: Lenient deserialization helpers for persisted records
//!
//! # Example
//!
//! ```ignore
//! use classrank_core::credentials::{new_student_id, new_temporary_password};
//! use classrank_core::errors::RecordError;
//!
//! let mut rng = rand::thread_rng();
//! let id = new_student_id(&mut rng, "07");
//! let password = new_temporary_password(&mut rng, 8);
//!
//! let error = RecordError::DuplicateRoll("07".to_string());
//! assert_eq!(error.code(), "duplicate_roll");
//! ```

pub mod credentials;
pub mod errors;
pub mod serde;

// Re-export commonly used types at crate root
pub use credentials::{new_class_id, new_student_id, new_temporary_password};
pub use errors::RecordError;
