//! Validated value types for domain primitives.
//!
//! Each type can only be constructed from input that satisfies its format,
//! and parsing failures map directly onto the matching [`RecordError`] kind.
//!
//! # Example
//!
//! ```ignore
//! use classrank_models::value_types::{ClassName, Mark, RollNumber};
//!
//! let class: ClassName = "10A".parse().unwrap();
//! let roll: RollNumber = "07".parse().unwrap();
//! let mark: Mark = "85".parse().unwrap();
//!
//! assert!("A10".parse::<ClassName>().is_err());
//! ```

use classrank_core::errors::RecordError;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ClassName
// ============================================================================

/// A class display name: one or more ASCII digits followed by exactly one letter.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClassName(String);

impl ClassName {
    /// Parse and validate a class name. Surrounding whitespace is ignored.
    pub fn new(name: impl AsRef<str>) -> Result<Self, RecordError> {
        let name = name.as_ref().trim();
        if !Self::is_valid(name) {
            return Err(RecordError::InvalidFormat(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    fn is_valid(name: &str) -> bool {
        let mut chars = name.chars();
        let Some(last) = chars.next_back() else {
            return false;
        };
        let digits = chars.as_str();
        last.is_ascii_alphabetic()
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Case-insensitive comparison used for uniqueness checks.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassName({})", self.0)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClassName {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// RollNumber
// ============================================================================

/// A roll number: a non-empty string of ASCII digits. Leading zeros are kept.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RollNumber(String);

impl RollNumber {
    pub fn new(roll: impl AsRef<str>) -> Result<Self, RecordError> {
        let roll = roll.as_ref().trim();
        if roll.is_empty() || !roll.chars().all(|c| c.is_ascii_digit()) {
            return Err(RecordError::InvalidRoll(roll.to_string()));
        }
        Ok(Self(roll.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for RollNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RollNumber({})", self.0)
    }
}

impl fmt::Display for RollNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RollNumber {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// Mark
// ============================================================================

/// A non-negative integer mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark(u32);

impl Mark {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Mark {
    type Error = RecordError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| RecordError::InvalidMark(value.to_string()))
    }
}

impl FromStr for Mark {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // u32::from_str accepts a leading '+'
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(RecordError::InvalidMark(trimmed.to_string()));
        }
        trimmed
            .parse::<u32>()
            .map(Self)
            .map_err(|_| RecordError::InvalidMark(trimmed.to_string()))
    }
}

impl From<Mark> for u32 {
    fn from(mark: Mark) -> u32 {
        mark.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod class_name_tests {
        use super::*;

        #[test]
        fn test_valid_class_names() {
            assert!(ClassName::new("10A").is_ok());
            assert!(ClassName::new("1b").is_ok());
            assert!(ClassName::new("123Z").is_ok());
            assert_eq!(ClassName::new("  9C ").unwrap().as_str(), "9C");
        }

        #[test]
        fn test_invalid_class_names() {
            for name in ["", "A", "10", "A10", "10AB", "1 0A", "10-A", "ten A", "١٠A"] {
                assert!(
                    matches!(ClassName::new(name), Err(RecordError::InvalidFormat(_))),
                    "expected '{}' to be rejected",
                    name
                );
            }
        }

        #[test]
        fn test_matches_ignores_case() {
            let name = ClassName::new("10A").unwrap();
            assert!(name.matches("10a"));
            assert!(name.matches("10A"));
            assert!(!name.matches("10B"));
        }

        #[test]
        fn test_class_name_parse() {
            let name: ClassName = "7d".parse().unwrap();
            assert_eq!(name.to_string(), "7d");
            assert_eq!(format!("{:?}", name), "ClassName(7d)");
        }
    }

    mod roll_number_tests {
        use super::*;

        #[test]
        fn test_valid_roll_numbers() {
            assert_eq!(RollNumber::new("07").unwrap().as_str(), "07");
            assert_eq!(RollNumber::new(" 12 ").unwrap().as_str(), "12");
        }

        #[test]
        fn test_invalid_roll_numbers() {
            for roll in ["", "  ", "7a", "-1", "1.5", "+3"] {
                assert!(
                    matches!(RollNumber::new(roll), Err(RecordError::InvalidRoll(_))),
                    "expected '{}' to be rejected",
                    roll
                );
            }
        }
    }

    mod mark_tests {
        use super::*;

        #[test]
        fn test_parse_marks() {
            assert_eq!("0".parse::<Mark>().unwrap().value(), 0);
            assert_eq!(" 85 ".parse::<Mark>().unwrap().value(), 85);
        }

        #[test]
        fn test_reject_invalid_marks() {
            for raw in ["", "-1", "+5", "8.5", "abc", "99999999999"] {
                assert!(
                    matches!(raw.parse::<Mark>(), Err(RecordError::InvalidMark(_))),
                    "expected '{}' to be rejected",
                    raw
                );
            }
        }

        #[test]
        fn test_mark_from_i64() {
            assert_eq!(Mark::try_from(90i64).unwrap(), Mark::new(90));
            assert!(matches!(
                Mark::try_from(-3i64),
                Err(RecordError::InvalidMark(_))
            ));
            assert!(Mark::try_from(i64::from(u32::MAX) + 1).is_err());
        }
    }
}
