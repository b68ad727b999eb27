//! # Classrank
//!
//! A single-user academic record keeper. Faculty accounts create classes,
//! enroll students and record per-subject marks; students log in to see
//! their own marks and rank.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── classrank-core/          # Record errors, id and password generation, serde helpers
//! ├── classrank-models/        # Snapshot, records, DTOs, sessions
//! ├── classrank-store/         # JSON file store with atomic saves
//! ├── classrank-config/        # Environment configuration
//! └── classrank-observability/ # Logging setup
//! src/
//! ├── access.rs     # Session guards shared by services
//! ├── cli/          # Prompts, table rendering and the seeder
//! ├── modules/      # Record services
//! │   ├── auth/     # Login and password change
//! │   ├── classes/  # Class creation, subjects, lookup
//! │   ├── faculties/
//! │   ├── marks/
//! │   ├── ranking/  # Totals, dense ranks, leaderboard, CSV export
//! │   └── students/ # Enrollment and report cards
//! └── state.rs      # Loaded snapshot plus its store
//! ```
//!
//! ## Sessions
//!
//! [`AuthService::authenticate`](modules::AuthService::authenticate) returns a
//! [`Session`](classrank_models::Session) that is passed explicitly into every
//! other operation. A student whose first login is pending must change their
//! password before any other student capability is granted.
//!
//! ## Persistence
//!
//! Each successful mutation rewrites the whole snapshot. A failed save never
//! undoes the in-memory change; it comes back as a
//! [`SaveStatus`](classrank_store::SaveStatus) inside [`state::Committed`].
//!
//! ## Quick Start
//!
//! ```bash
//! classrank register-faculty -u alice -n "Alice Smith"
//! classrank create-class -u alice 10A
//! classrank add-subject -u alice --class 10A Math
//! classrank enroll -u alice --class 10A --roll 7 --name "Jane Doe"
//! classrank leaderboard -u alice --class 10A
//! ```

pub(crate) mod access;
pub mod cli;
pub mod modules;
pub mod state;

// Re-export workspace crates for convenience
pub use classrank_config;
pub use classrank_core;
pub use classrank_models;
pub use classrank_observability;
pub use classrank_store;
