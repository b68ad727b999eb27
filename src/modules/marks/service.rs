use tracing::{info, instrument};

use classrank_core::RecordError;
use classrank_models::{ClassId, Mark, Session, Snapshot, StudentId};

use crate::access::require_class_owner;
use crate::state::{AppState, Committed};

pub struct MarkService;

impl MarkService {
    /// Record one mark for a student in a subject their class offers.
    ///
    /// Overwrites any earlier mark for the same subject.
    #[instrument(skip(state), fields(session = %session.key()))]
    pub fn set_mark(
        state: &mut AppState,
        session: &Session,
        student_id: &str,
        subject: &str,
        value: i64,
    ) -> Result<Committed<()>, RecordError> {
        let mark = Mark::try_from(value)?;
        let student_id = Self::check_subjects(&state.snapshot, session, student_id, [subject])?;

        if let Some(student) = state.snapshot.students.get_mut(&student_id) {
            student.marks.insert(subject.to_string(), mark.value());
        }
        info!(student_id = %student_id, subject, mark = mark.value(), "Mark recorded");

        Ok(state.commit(()))
    }

    /// Record several marks for one student in a single commit.
    ///
    /// Every entry is checked first; if any fails nothing is written.
    #[instrument(skip(state, entries), fields(session = %session.key(), count = entries.len()))]
    pub fn set_marks(
        state: &mut AppState,
        session: &Session,
        student_id: &str,
        entries: &[(String, i64)],
    ) -> Result<Committed<usize>, RecordError> {
        let marks = entries
            .iter()
            .map(|(subject, value)| Mark::try_from(*value).map(|mark| (subject.as_str(), mark)))
            .collect::<Result<Vec<_>, _>>()?;
        let student_id = Self::check_subjects(
            &state.snapshot,
            session,
            student_id,
            marks.iter().map(|(subject, _)| *subject),
        )?;

        if let Some(student) = state.snapshot.students.get_mut(&student_id) {
            for (subject, mark) in &marks {
                student.marks.insert(subject.to_string(), mark.value());
            }
        }
        info!(student_id = %student_id, count = marks.len(), "Marks recorded");

        Ok(state.commit(marks.len()))
    }

    /// Resolve the student, check the session owns their class and that every
    /// subject is currently offered by it.
    fn check_subjects<'s>(
        snapshot: &Snapshot,
        session: &Session,
        student_id: &str,
        subjects: impl IntoIterator<Item = &'s str>,
    ) -> Result<StudentId, RecordError> {
        let (student_id, student) = snapshot
            .students
            .get_key_value(student_id)
            .ok_or_else(|| RecordError::not_found(format!("Student '{}'", student_id)))?;
        let class_id: &ClassId = student
            .class_id
            .as_ref()
            .ok_or_else(|| RecordError::not_found(format!("Class for student '{}'", student_id)))?;
        let (_, class) = require_class_owner(snapshot, session, class_id.as_str())?;

        for subject in subjects {
            if !class.offers(subject) {
                return Err(RecordError::SubjectNotOffered(subject.to_string()));
            }
        }
        Ok(student_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classrank_models::{Class, Faculty, Student, Username};
    use classrank_store::MemoryStore;

    fn state() -> AppState {
        let mut snapshot = Snapshot::new();
        snapshot
            .faculties
            .insert(Username::new("alice"), Faculty::default());
        let mut class = Class::new("10A", Username::new("alice"));
        class.subjects = vec!["Math".into(), "Science".into()];
        class.students.push(StudentId::new("S1"));
        snapshot.classes.insert(ClassId::new("c1"), class);
        snapshot.students.insert(
            StudentId::new("S1"),
            Student::enrolled("Jane", "pw", ClassId::new("c1"), "1"),
        );
        AppState::open(MemoryStore::with_snapshot(snapshot))
    }

    fn alice() -> Session {
        Session::Faculty {
            username: Username::new("alice"),
        }
    }

    #[test]
    fn test_bulk_is_all_or_nothing() {
        let mut state = state();
        let entries = vec![("Math".to_string(), 80), ("Art".to_string(), 70)];

        let result = MarkService::set_marks(&mut state, &alice(), "S1", &entries);
        assert_eq!(
            result.map(|c| c.value),
            Err(RecordError::SubjectNotOffered("Art".into()))
        );
        assert!(state.snapshot().student("S1").unwrap().marks.is_empty());
    }

    #[test]
    fn test_bulk_writes_every_entry() {
        let mut state = state();
        let entries = vec![("Math".to_string(), 80), ("Science".to_string(), 90)];

        let committed = MarkService::set_marks(&mut state, &alice(), "S1", &entries).unwrap();
        assert_eq!(committed.value, 2);
        let student = state.snapshot().student("S1").unwrap();
        assert_eq!(student.mark("Math"), 80);
        assert_eq!(student.mark("Science"), 90);
    }

    #[test]
    fn test_negative_mark_checked_first() {
        let mut state = state();
        let result = MarkService::set_mark(&mut state, &alice(), "S1", "Art", -1);
        assert_eq!(
            result.map(|c| c.value),
            Err(RecordError::InvalidMark("-1".into()))
        );
    }
}
