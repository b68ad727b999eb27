//! Authentication and session models.
//!
//! A [`Session`] is an explicit value handed back by a successful login and
//! passed into every record operation. The core keeps no notion of a
//! "current user" between calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{StudentId, Username};
use classrank_core::errors::RecordError;

/// Which kind of account a login targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Faculty,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Faculty => write!(f, "faculty"),
            Self::Student => write!(f, "student"),
        }
    }
}

impl FromStr for Role {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faculty" => Ok(Self::Faculty),
            "student" => Ok(Self::Student),
            other => Err(RecordError::invalid_input(format!(
                "unknown role '{}'",
                other
            ))),
        }
    }
}

/// An authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Session {
    Faculty { username: Username },
    Student { id: StudentId },
}

impl Session {
    pub fn role(&self) -> Role {
        match self {
            Self::Faculty { .. } => Role::Faculty,
            Self::Student { .. } => Role::Student,
        }
    }

    pub fn faculty(&self) -> Option<&Username> {
        match self {
            Self::Faculty { username } => Some(username),
            Self::Student { .. } => None,
        }
    }

    pub fn student(&self) -> Option<&StudentId> {
        match self {
            Self::Student { id } => Some(id),
            Self::Faculty { .. } => None,
        }
    }

    /// The login key: a username or a student id.
    pub fn key(&self) -> &str {
        match self {
            Self::Faculty { username } => username.as_str(),
            Self::Student { id } => id.as_str(),
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub session: Session,
    /// Always false for faculty. When true the caller must run a password
    /// change before granting any other student capability.
    pub first_login_pending: bool,
}
