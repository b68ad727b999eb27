mod common;

use classrank::classrank_core::{RecordError, new_student_id};
use classrank::classrank_models::{
    Class, ClassId, EnrollStudentDto, Faculty, Session, Snapshot, Student, StudentId, Username,
};
use classrank::modules::StudentService;
use rand::SeedableRng;
use rand::rngs::StdRng;

use common::{create_class, empty_state, enroll, register_faculty, set_mark, state_from};

#[test]
fn test_enroll_generates_credentials() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let class_id = create_class(&mut state, &alice, "10A", &[]);

    let enrolled = enroll(&mut state, &alice, &class_id, "07", "Jane Doe");

    let suffix = enrolled.id.as_str().strip_prefix("STU_07_").unwrap();
    assert_eq!(suffix.len(), 4);
    assert!(
        suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );
    assert_eq!(enrolled.temporary_password.len(), 8);
    assert!(
        enrolled
            .temporary_password
            .chars()
            .all(|c| c.is_ascii_alphanumeric())
    );

    let student = state.snapshot().student(enrolled.id.as_str()).unwrap();
    assert!(student.first_login);
    assert_eq!(student.roll_no, "07");
    assert_eq!(student.class_id.as_ref(), Some(&class_id));
    assert!(student.marks.is_empty());
    assert!(state.snapshot().integrity_issues().is_empty());
}

#[test]
fn test_invalid_roll_rejected() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let class_id = create_class(&mut state, &alice, "10A", &[]);

    for roll in ["", "7a", "-1", "+3", "1.5"] {
        let result = StudentService::enroll_student(
            &mut state,
            &alice,
            class_id.as_str(),
            EnrollStudentDto::new(roll, "Jane"),
        );
        assert!(
            matches!(result, Err(RecordError::InvalidRoll(_))),
            "{:?} should be rejected",
            roll
        );
    }
    assert!(state.snapshot().students.is_empty());
}

#[test]
fn test_duplicate_roll_leaves_snapshot_unchanged() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let class_id = create_class(&mut state, &alice, "10A", &[]);
    enroll(&mut state, &alice, &class_id, "07", "Jane");
    let before = state.snapshot().clone();

    let result = StudentService::enroll_student(
        &mut state,
        &alice,
        class_id.as_str(),
        EnrollStudentDto::new("07", "John"),
    );

    assert_eq!(
        result.map(|c| c.value),
        Err(RecordError::DuplicateRoll("07".into()))
    );
    assert_eq!(state.snapshot(), &before);
}

#[test]
fn test_same_roll_allowed_in_other_class() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let a = create_class(&mut state, &alice, "10A", &[]);
    let b = create_class(&mut state, &alice, "10B", &[]);

    let first = enroll(&mut state, &alice, &a, "1", "Jane");
    let second = enroll(&mut state, &alice, &b, "1", "John");
    assert_ne!(first.id, second.id);
}

#[test]
fn test_enroll_into_foreign_or_missing_class() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let bob = register_faculty(&mut state, "bob");
    let class_id = create_class(&mut state, &alice, "10A", &[]);

    let foreign = StudentService::enroll_student(
        &mut state,
        &bob,
        class_id.as_str(),
        EnrollStudentDto::new("1", "Jane"),
    );
    assert!(matches!(foreign, Err(RecordError::Forbidden(_))));

    let missing = StudentService::enroll_student(
        &mut state,
        &alice,
        "class_0_GONE",
        EnrollStudentDto::new("1", "Jane"),
    );
    assert!(matches!(missing, Err(RecordError::NotFound(_))));
}

#[test]
fn test_id_collision_draws_again() {
    const SEED: u64 = 42;

    let mut snapshot = Snapshot::new();
    snapshot
        .faculties
        .insert(Username::new("alice"), Faculty::default());
    snapshot.classes.insert(
        ClassId::new("c1"),
        Class::new("10A", Username::new("alice")),
    );
    let mut other = Class::new("10B", Username::new("alice"));

    // the first id a fresh SEED rng would produce for roll 07
    let taken = StudentId::new(new_student_id(&mut StdRng::seed_from_u64(SEED), "07"));
    other.students.push(taken.clone());
    snapshot.classes.insert(ClassId::new("c2"), other);
    snapshot.students.insert(
        taken.clone(),
        Student::enrolled("Existing", "pw", ClassId::new("c2"), "07"),
    );

    let mut state = state_from(snapshot, SEED);
    let alice = Session::Faculty {
        username: Username::new("alice"),
    };
    let enrolled = enroll(&mut state, &alice, &ClassId::new("c1"), "07", "Jane");

    assert_ne!(enrolled.id, taken);
    assert!(enrolled.id.as_str().starts_with("STU_07_"));
    assert_eq!(state.snapshot().students.len(), 2);
    assert_eq!(
        state.snapshot().student(taken.as_str()).unwrap().name,
        "Existing"
    );
}

#[test]
fn test_report_card_requires_password_change() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let class_id = create_class(&mut state, &alice, "10A", &["Math"]);
    let jane = enroll(&mut state, &alice, &class_id, "1", "Jane");
    let session = Session::Student {
        id: jane.id.clone(),
    };

    assert_eq!(
        StudentService::report_card(state.snapshot(), &session, jane.id.as_str()),
        Err(RecordError::PasswordChangeRequired)
    );

    // faculty owning the class can still read it
    set_mark(&mut state, &alice, &jane, "Math", 88);
    let card = StudentService::report_card(state.snapshot(), &alice, jane.id.as_str()).unwrap();
    assert_eq!(card.total, 88);
    assert_eq!(card.rank, Some(1));
    assert_eq!(card.class_name.as_deref(), Some("10A"));
}

#[test]
fn test_report_card_for_student_without_class() {
    let mut snapshot = Snapshot::new();
    let mut student = Student::enrolled("Orphan", "pw", ClassId::new("gone"), "3");
    student.class_id = None;
    student.first_login = false;
    snapshot.students.insert(StudentId::new("S1"), student);

    let state = state_from(snapshot, 1);
    let session = Session::Student {
        id: StudentId::new("S1"),
    };
    let card = StudentService::report_card(state.snapshot(), &session, "S1").unwrap();

    assert!(card.class_id.is_none());
    assert!(card.marks.is_empty());
    assert_eq!(card.total, 0);
    assert_eq!(card.rank, None);
}

#[test]
fn test_student_cannot_read_another_student() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let class_id = create_class(&mut state, &alice, "10A", &[]);
    let jane = enroll(&mut state, &alice, &class_id, "1", "Jane");
    let john = enroll(&mut state, &alice, &class_id, "2", "John");

    let session = Session::Student { id: jane.id };
    assert!(matches!(
        StudentService::report_card(state.snapshot(), &session, john.id.as_str()),
        Err(RecordError::Forbidden(_))
    ));
}
