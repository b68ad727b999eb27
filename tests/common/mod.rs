#![allow(dead_code)]

use classrank::classrank_models::{
    AddSubjectDto, ClassId, CreateClassDto, EnrollStudentDto, EnrolledStudent, RegisterFacultyDto,
    Session, Snapshot, Username,
};
use classrank::classrank_store::MemoryStore;
use classrank::modules::{ClassService, FacultyService, MarkService, StudentService};
use classrank::state::AppState;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const TEST_PASSWORD: &str = "Secret123";

/// Fresh state over an empty in-memory store with a fixed random seed.
pub fn empty_state() -> AppState {
    AppState::with_rng(MemoryStore::new(), StdRng::seed_from_u64(7))
}

/// State loaded from `snapshot` with the given random seed.
pub fn state_from(snapshot: Snapshot, seed: u64) -> AppState {
    AppState::with_rng(MemoryStore::with_snapshot(snapshot), StdRng::seed_from_u64(seed))
}

pub fn faculty_session(username: &str) -> Session {
    Session::Faculty {
        username: Username::new(username),
    }
}

pub fn register_faculty(state: &mut AppState, username: &str) -> Session {
    let committed = FacultyService::register_faculty(
        state,
        RegisterFacultyDto::new(username, format!("{} Teacher", username), TEST_PASSWORD),
    )
    .expect("register faculty");
    assert!(committed.is_durable());
    faculty_session(username)
}

pub fn create_class(
    state: &mut AppState,
    session: &Session,
    name: &str,
    subjects: &[&str],
) -> ClassId {
    let class_id = ClassService::create_class(state, session, CreateClassDto::new(name))
        .expect("create class")
        .into_value();
    for subject in subjects {
        let _ = ClassService::add_subject(
            state,
            session,
            class_id.as_str(),
            AddSubjectDto::new(*subject),
        )
        .expect("add subject");
    }
    class_id
}

pub fn enroll(
    state: &mut AppState,
    session: &Session,
    class_id: &ClassId,
    roll: &str,
    name: &str,
) -> EnrolledStudent {
    StudentService::enroll_student(
        state,
        session,
        class_id.as_str(),
        EnrollStudentDto::new(roll, name),
    )
    .expect("enroll student")
    .into_value()
}

pub fn set_mark(
    state: &mut AppState,
    session: &Session,
    student: &EnrolledStudent,
    subject: &str,
    mark: i64,
) {
    let _ = MarkService::set_mark(state, session, student.id.as_str(), subject, mark)
        .expect("set mark");
}
