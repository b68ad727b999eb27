//! Strongly-typed ID newtypes for domain entities.
//!
//! Every key in the snapshot is a plain string on disk, but inside the
//! program a [`StudentId`] cannot be passed where a [`ClassId`] is expected.
//!
//! # Example
//!
//! ```ignore
//! use classrank_models::ids::{ClassId, StudentId};
//!
//! fn enroll(class: &ClassId) { /* ... */ }
//!
//! let class_id = ClassId::new("class_1700000000_AB12");
//! let student_id = StudentId::new("STU_07_X9Q2");
//!
//! enroll(&class_id);     // OK
//! // enroll(&student_id); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Macro to define a strongly-typed string ID newtype.
///
/// The generated type serializes transparently as its inner string and
/// implements `Borrow<str>` so maps keyed by it can be queried with `&str`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner String.
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Generated identifier of a student, e.g. `STU_07_X9Q2`.
    StudentId
);

define_id!(
    /// Generated identifier of a class, e.g. `class_1700000000_AB12`.
    ClassId
);

define_id!(
    /// Faculty username, chosen at registration. Case-sensitive.
    Username
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_id_display_and_debug() {
        let id = StudentId::new("STU_07_ABCD");
        assert_eq!(id.to_string(), "STU_07_ABCD");
        assert_eq!(format!("{:?}", id), "StudentId(STU_07_ABCD)");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = ClassId::new("class_1_ZZZZ");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"class_1_ZZZZ\"");

        let parsed: ClassId = serde_json::from_str("\"class_1_ZZZZ\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(Username::new("alice"), 1);

        assert_eq!(map.get("alice"), Some(&1));
        assert_eq!(map.get("Alice"), None);
    }

    #[test]
    fn test_id_as_map_key_roundtrip() {
        let mut map = BTreeMap::new();
        map.insert(StudentId::new("STU_1_AAAA"), 10u32);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"STU_1_AAAA":10}"#);

        let back: BTreeMap<StudentId, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_id_compares_with_str() {
        let id = Username::new("bob");
        assert!(id == "bob");
        assert_eq!(id.into_inner(), "bob".to_string());
    }
}
