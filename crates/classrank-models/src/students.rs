//! Student domain models and DTOs.
//!
//! This module contains the persisted student record, the enrollment and
//! password-change DTOs, and the report card shown to a logged-in student.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::ids::{ClassId, StudentId};
use classrank_core::serde::{
    deserialize_lenient_marks, deserialize_optional_string, lenient_string, null_as_true,
};

fn default_first_login() -> bool {
    true
}

/// A student record. Keyed by generated id in the snapshot.
///
/// Older records may lack `roll_no`, `class_id` or `marks`, or hold them as
/// numbers or lists; those fields are coerced or fall back to empty values
/// on load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,
    /// True until the student performs their first password change.
    #[serde(default = "default_first_login", deserialize_with = "null_as_true")]
    pub first_login: bool,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub class_id: Option<ClassId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub roll_no: String,
    /// Subject name -> mark.
    #[serde(default, deserialize_with = "deserialize_lenient_marks")]
    pub marks: BTreeMap<String, u32>,
}

impl Student {
    /// A freshly enrolled student with a temporary password.
    pub fn enrolled(
        name: impl Into<String>,
        temporary_password: impl Into<String>,
        class_id: ClassId,
        roll_no: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            password: temporary_password.into(),
            first_login: true,
            class_id: Some(class_id),
            roll_no: roll_no.into(),
            marks: BTreeMap::new(),
        }
    }

    /// Recorded mark for a subject, 0 if unset.
    #[inline]
    pub fn mark(&self, subject: &str) -> u32 {
        self.marks.get(subject).copied().unwrap_or(0)
    }

    pub fn belongs_to(&self, class_id: &ClassId) -> bool {
        self.class_id.as_ref() == Some(class_id)
    }
}

/// DTO for enrolling a student into a class.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct EnrollStudentDto {
    pub roll_no: String,
    #[validate(length(min = 1, message = "Student name required"))]
    pub name: String,
}

impl EnrollStudentDto {
    pub fn new(roll_no: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            roll_no: self.roll_no.trim().to_string(),
            name: self.name.trim().to_string(),
        }
    }
}

/// The only place a student's temporary password is ever revealed.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EnrolledStudent {
    pub id: StudentId,
    pub temporary_password: String,
}

/// DTO for a student changing their password.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub new_password: String,
}

impl ChangePasswordDto {
    pub fn new(new_password: impl Into<String>) -> Self {
        Self {
            new_password: new_password.into(),
        }
    }
}

/// One subject line on a report card.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubjectMark {
    pub subject: String,
    pub mark: u32,
}

/// A student's marks, total and rank within their class.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ReportCard {
    pub student_id: StudentId,
    pub name: String,
    pub roll_no: String,
    /// `None` for a record whose class reference is missing or dangling.
    pub class_id: Option<ClassId>,
    pub class_name: Option<String>,
    /// In class subject order, 0 for subjects without a recorded mark.
    pub marks: Vec<SubjectMark>,
    pub total: u64,
    pub rank: Option<u32>,
}
