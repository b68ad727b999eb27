//! Record validation errors.
//!
//! Every Record Operation validates before it mutates, so each of these
//! errors means the snapshot was left untouched. None of them is retried
//! automatically; the caller decides what to show.

/// A validation failure raised by a record operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Class name '{0}' must start with digits and end with one letter (e.g. 10A)")]
    InvalidFormat(String),

    #[error("Class '{0}' already exists")]
    DuplicateClassName(String),

    #[error("Subject '{0}' already exists in this class")]
    DuplicateSubject(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Roll number '{0}' must be numeric")]
    InvalidRoll(String),

    #[error("Roll number '{0}' already exists in this class")]
    DuplicateRoll(String),

    #[error("Mark '{0}' must be a non-negative integer")]
    InvalidMark(String),

    #[error("Subject '{0}' is not offered in this class")]
    SubjectNotOffered(String),

    #[error("Invalid credentials")]
    AuthFailed,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Password must be changed before continuing")]
    PasswordChangeRequired,
}

impl RecordError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateUsername(_) => "duplicate_username",
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidFormat(_) => "invalid_format",
            Self::DuplicateClassName(_) => "duplicate_class_name",
            Self::DuplicateSubject(_) => "duplicate_subject",
            Self::NotFound(_) => "not_found",
            Self::InvalidRoll(_) => "invalid_roll",
            Self::DuplicateRoll(_) => "duplicate_roll",
            Self::InvalidMark(_) => "invalid_mark",
            Self::SubjectNotOffered(_) => "subject_not_offered",
            Self::AuthFailed => "auth_failed",
            Self::Forbidden(_) => "forbidden",
            Self::PasswordChangeRequired => "password_change_required",
        }
    }
}
