//! Faculty models and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use classrank_core::serde::lenient_string;

/// A faculty account. Keyed by username in the snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Faculty {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Stored and compared as a plain value.
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,
}

/// DTO for registering a new faculty account.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct RegisterFacultyDto {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Full name required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Password required"))]
    pub password: String,
}

impl RegisterFacultyDto {
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            password: password.into(),
        }
    }

    /// Trim username and name. Passwords are kept verbatim.
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            name: self.name.trim().to_string(),
            password: self.password,
        }
    }
}
