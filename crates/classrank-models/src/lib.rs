//! # Classrank Models
//!
//! Domain models and DTOs for classrank.
//!
//! This crate provides the data structures shared by the store, the record
//! services and the command-line front end.
//!
//! # Modules
//!
//! - [`auth`]: Roles, sessions and login outcomes
//! - [`classes`]: Class records and class DTOs
//! - [`faculties`]: Faculty records and registration DTO
//! - [`ids`]: Strongly-typed identifiers
//! - [`ranking`]: Standings and leaderboard rows
//! - [`snapshot`]: The persisted record set and its integrity check
//! - [`students`]: Student records, enrollment DTOs and report cards
//! - [`validation`]: DTO validation helpers
//! - [`value_types`]: Validated class names, roll numbers and marks
//!
//! # Example
//!
//! ```ignore
//! use classrank_models::{Snapshot, ClassName};
//!
//! let snapshot = Snapshot::new();
//! assert!(snapshot.is_empty());
//!
//! let name: ClassName = "10A".parse()?;
//! ```

pub mod auth;
pub mod classes;
pub mod faculties;
pub mod ids;
pub mod ranking;
pub mod snapshot;
pub mod students;
pub mod validation;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginOutcome, Role, Session};
pub use classes::{AddSubjectDto, Class, CreateClassDto};
pub use faculties::{Faculty, RegisterFacultyDto};
pub use ids::{ClassId, StudentId, Username};
pub use ranking::{LeaderboardRow, Standing};
pub use snapshot::{IntegrityIssue, Snapshot};
pub use students::{
    ChangePasswordDto, EnrollStudentDto, EnrolledStudent, ReportCard, Student, SubjectMark,
};
pub use validation::validate_dto;
pub use value_types::{ClassName, Mark, RollNumber};
