//! Class models and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{StudentId, Username};
use classrank_core::serde::{lenient_string, lenient_string_list};

/// A class owned by one faculty. Keyed by generated id in the snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Class {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Owning faculty's username.
    #[serde(default, deserialize_with = "lenient_string")]
    pub faculty: Username,
    /// Subject names in display order.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub subjects: Vec<String>,
    /// Enrolled students in enrollment order.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub students: Vec<StudentId>,
}

impl Class {
    pub fn new(name: impl Into<String>, faculty: Username) -> Self {
        Self {
            name: name.into(),
            faculty,
            subjects: Vec::new(),
            students: Vec::new(),
        }
    }

    pub fn offers(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    pub fn is_owned_by(&self, username: &Username) -> bool {
        &self.faculty == username
    }
}

/// DTO for creating a class. The name is checked against the class-name
/// format by the service, so an empty name is a format error.
#[derive(Deserialize, Debug, Clone)]
pub struct CreateClassDto {
    pub name: String,
}

impl CreateClassDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }
}

/// DTO for adding a subject to a class.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct AddSubjectDto {
    #[validate(length(min = 1, message = "Subject name cannot be empty"))]
    pub subject: String,
}

impl AddSubjectDto {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into().trim().to_string(),
        }
    }
}
