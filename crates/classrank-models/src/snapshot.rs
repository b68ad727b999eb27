//! The complete record set persisted as one document.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::classes::Class;
use crate::faculties::Faculty;
use crate::ids::{ClassId, StudentId, Username};
use crate::students::Student;
use classrank_core::serde::deserialize_lenient_map;

/// All faculties, students and classes at a point in time.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "deserialize_lenient_map")]
    pub faculties: BTreeMap<Username, Faculty>,
    #[serde(default, deserialize_with = "deserialize_lenient_map")]
    pub students: BTreeMap<StudentId, Student>,
    #[serde(default, deserialize_with = "deserialize_lenient_map")]
    pub classes: BTreeMap<ClassId, Class>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.faculties.is_empty() && self.students.is_empty() && self.classes.is_empty()
    }

    pub fn faculty(&self, username: &str) -> Option<&Faculty> {
        self.faculties.get(username)
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn class(&self, id: &str) -> Option<&Class> {
        self.classes.get(id)
    }

    /// Find a class whose display name matches ignoring case.
    pub fn class_named(&self, name: &str) -> Option<(&ClassId, &Class)> {
        let name = name.trim();
        self.classes
            .iter()
            .find(|(_, class)| class.name.eq_ignore_ascii_case(name))
    }

    /// Whether any student enrolled in `class_id` already holds `roll_no`.
    pub fn roll_taken(&self, class_id: &ClassId, roll_no: &str) -> bool {
        self.classes.get(class_id).is_some_and(|class| {
            class.students.iter().any(|sid| {
                self.students
                    .get(sid)
                    .is_some_and(|s| s.roll_no == roll_no)
            })
        })
    }

    /// Classes owned by a faculty, ordered by display name then id.
    pub fn classes_of(&self, username: &Username) -> Vec<(&ClassId, &Class)> {
        let mut classes: Vec<_> = self
            .classes
            .iter()
            .filter(|(_, class)| class.is_owned_by(username))
            .collect();
        classes.sort_by(|(a_id, a), (b_id, b)| {
            a.name
                .to_ascii_lowercase()
                .cmp(&b.name.to_ascii_lowercase())
                .then_with(|| a_id.cmp(b_id))
        });
        classes
    }

    /// Report every cross-entity inconsistency in the snapshot.
    ///
    /// An empty result means the referential invariants hold: enrollment is
    /// bidirectional, roll numbers and subjects are unique per class, and
    /// class names are unique ignoring case.
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        let mut seen_names: BTreeMap<String, &ClassId> = BTreeMap::new();

        for (class_id, class) in &self.classes {
            let mut rolls = HashSet::new();
            let mut enrolled = HashSet::new();

            for student_id in &class.students {
                if !enrolled.insert(student_id) {
                    issues.push(IntegrityIssue::DuplicateEnrollment {
                        class_id: class_id.clone(),
                        student_id: student_id.clone(),
                    });
                    continue;
                }
                match self.students.get(student_id) {
                    None => issues.push(IntegrityIssue::MissingStudent {
                        class_id: class_id.clone(),
                        student_id: student_id.clone(),
                    }),
                    Some(student) => {
                        if !student.belongs_to(class_id) {
                            issues.push(IntegrityIssue::ClassReferenceMismatch {
                                class_id: class_id.clone(),
                                student_id: student_id.clone(),
                            });
                        }
                        if !rolls.insert(student.roll_no.as_str()) {
                            issues.push(IntegrityIssue::DuplicateRoll {
                                class_id: class_id.clone(),
                                roll_no: student.roll_no.clone(),
                            });
                        }
                    }
                }
            }

            let mut subjects = HashSet::new();
            for subject in &class.subjects {
                if !subjects.insert(subject.as_str()) {
                    issues.push(IntegrityIssue::DuplicateSubject {
                        class_id: class_id.clone(),
                        subject: subject.clone(),
                    });
                }
            }

            let folded = class.name.to_ascii_lowercase();
            if let Some(first) = seen_names.get(&folded) {
                issues.push(IntegrityIssue::DuplicateClassName {
                    class_id: class_id.clone(),
                    other: (*first).clone(),
                    name: class.name.clone(),
                });
            } else {
                seen_names.insert(folded, class_id);
            }
        }

        for (student_id, student) in &self.students {
            let Some(class_id) = &student.class_id else {
                continue;
            };
            let listed = self
                .classes
                .get(class_id)
                .is_some_and(|class| class.students.contains(student_id));
            if !listed {
                issues.push(IntegrityIssue::NotEnrolled {
                    class_id: class_id.clone(),
                    student_id: student_id.clone(),
                });
            }
        }

        issues
    }
}

/// A referential inconsistency found in a loaded snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// A class lists a student id that has no record.
    MissingStudent {
        class_id: ClassId,
        student_id: StudentId,
    },
    /// A class lists a student whose class reference points elsewhere.
    ClassReferenceMismatch {
        class_id: ClassId,
        student_id: StudentId,
    },
    /// A student references a class that does not list them.
    NotEnrolled {
        class_id: ClassId,
        student_id: StudentId,
    },
    DuplicateEnrollment {
        class_id: ClassId,
        student_id: StudentId,
    },
    DuplicateRoll {
        class_id: ClassId,
        roll_no: String,
    },
    DuplicateSubject {
        class_id: ClassId,
        subject: String,
    },
    DuplicateClassName {
        class_id: ClassId,
        other: ClassId,
        name: String,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStudent {
                class_id,
                student_id,
            } => write!(f, "class {} lists unknown student {}", class_id, student_id),
            Self::ClassReferenceMismatch {
                class_id,
                student_id,
            } => write!(
                f,
                "class {} lists student {} whose class reference differs",
                class_id, student_id
            ),
            Self::NotEnrolled {
                class_id,
                student_id,
            } => write!(
                f,
                "student {} references class {} but is not enrolled there",
                student_id, class_id
            ),
            Self::DuplicateEnrollment {
                class_id,
                student_id,
            } => write!(f, "class {} lists student {} twice", class_id, student_id),
            Self::DuplicateRoll { class_id, roll_no } => {
                write!(f, "class {} has roll number {} twice", class_id, roll_no)
            }
            Self::DuplicateSubject { class_id, subject } => {
                write!(f, "class {} has subject '{}' twice", class_id, subject)
            }
            Self::DuplicateClassName {
                class_id,
                other,
                name,
            } => write!(
                f,
                "class {} reuses name '{}' already held by {}",
                class_id, name, other
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.faculties.insert(
            Username::new("alice"),
            Faculty {
                name: "Alice".into(),
                password: "pw".into(),
            },
        );

        let class_id = ClassId::new("c1");
        let mut class = Class::new("10A", Username::new("alice"));
        class.subjects = vec!["Math".into(), "Science".into()];
        class.students = vec![StudentId::new("s1"), StudentId::new("s2")];
        snapshot.classes.insert(class_id.clone(), class);

        snapshot.students.insert(
            StudentId::new("s1"),
            Student::enrolled("One", "pw", class_id.clone(), "1"),
        );
        snapshot.students.insert(
            StudentId::new("s2"),
            Student::enrolled("Two", "pw", class_id, "2"),
        );
        snapshot
    }

    #[test]
    fn test_empty_document_structure() {
        let value = serde_json::to_value(Snapshot::new()).unwrap();
        assert_eq!(
            value,
            json!({ "faculties": {}, "students": {}, "classes": {} })
        );
    }

    #[test]
    fn test_missing_top_level_keys_default() {
        let snapshot: Snapshot = serde_json::from_value(json!({ "faculties": {} })).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_consistent_snapshot_has_no_issues() {
        assert!(sample().integrity_issues().is_empty());
    }

    #[test]
    fn test_class_named_ignores_case() {
        let snapshot = sample();
        let (id, class) = snapshot.class_named("10a").unwrap();
        assert_eq!(id, &ClassId::new("c1"));
        assert_eq!(class.name, "10A");
        assert!(snapshot.class_named("10B").is_none());
    }

    #[test]
    fn test_roll_taken() {
        let snapshot = sample();
        let class_id = ClassId::new("c1");
        assert!(snapshot.roll_taken(&class_id, "1"));
        assert!(!snapshot.roll_taken(&class_id, "3"));
        assert!(!snapshot.roll_taken(&ClassId::new("missing"), "1"));
    }

    #[test]
    fn test_missing_student_reported() {
        let mut snapshot = sample();
        snapshot.students.remove("s2");

        let issues = snapshot.integrity_issues();
        assert_eq!(
            issues,
            vec![IntegrityIssue::MissingStudent {
                class_id: ClassId::new("c1"),
                student_id: StudentId::new("s2"),
            }]
        );
    }

    #[test]
    fn test_duplicate_roll_and_subject_reported() {
        let mut snapshot = sample();
        snapshot.students.get_mut("s2").unwrap().roll_no = "1".into();
        snapshot
            .classes
            .get_mut("c1")
            .unwrap()
            .subjects
            .push("Math".into());

        let issues = snapshot.integrity_issues();
        assert!(issues.contains(&IntegrityIssue::DuplicateRoll {
            class_id: ClassId::new("c1"),
            roll_no: "1".into(),
        }));
        assert!(issues.contains(&IntegrityIssue::DuplicateSubject {
            class_id: ClassId::new("c1"),
            subject: "Math".into(),
        }));
    }

    #[test]
    fn test_one_sided_enrollment_reported() {
        let mut snapshot = sample();
        snapshot.classes.get_mut("c1").unwrap().students.pop();

        let issues = snapshot.integrity_issues();
        assert_eq!(
            issues,
            vec![IntegrityIssue::NotEnrolled {
                class_id: ClassId::new("c1"),
                student_id: StudentId::new("s2"),
            }]
        );
    }

    #[test]
    fn test_duplicate_class_name_reported() {
        let mut snapshot = sample();
        snapshot.classes.insert(
            ClassId::new("c2"),
            Class::new("10a", Username::new("alice")),
        );

        let issues = snapshot.integrity_issues();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            IntegrityIssue::DuplicateClassName { .. }
        ));
    }

    #[test]
    fn test_classes_of_sorted_by_name() {
        let mut snapshot = sample();
        snapshot.classes.insert(
            ClassId::new("c0"),
            Class::new("9B", Username::new("alice")),
        );
        snapshot.classes.insert(
            ClassId::new("c9"),
            Class::new("11C", Username::new("bob")),
        );

        let names: Vec<&str> = snapshot
            .classes_of(&Username::new("alice"))
            .into_iter()
            .map(|(_, class)| class.name.as_str())
            .collect();
        assert_eq!(names, vec!["10A", "9B"]);
    }
}
