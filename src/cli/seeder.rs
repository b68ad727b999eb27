use fake::Fake;
use fake::faker::name::en::{FirstName, Name};
use rand::Rng;
use tracing::info;

use classrank_core::{RecordError, new_temporary_password};
use classrank_core::credentials::DEFAULT_PASSWORD_LEN;
use classrank_models::{
    AddSubjectDto, CreateClassDto, EnrollStudentDto, EnrolledStudent, RegisterFacultyDto, Session,
    Username,
};
use classrank_store::SaveStatus;

use crate::modules::{ClassService, FacultyService, MarkService, StudentService};
use crate::state::AppState;

pub const DEFAULT_SUBJECTS: [&str; 3] = ["Math", "Science", "English"];

pub struct SeedCounts {
    pub faculties: usize,
    pub classes_per_faculty: usize,
    pub students_per_class: usize,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            faculties: 2,
            classes_per_faculty: 2,
            students_per_class: 10,
        }
    }
}

/// Accounts created by a seed run.
#[derive(Debug, Default)]
pub struct SeedReport {
    /// Username and password of each new faculty.
    pub faculties: Vec<(Username, String)>,
    pub classes: usize,
    pub students: Vec<EnrolledStudent>,
    /// Outcome of the last save, which covers every earlier change.
    pub save: Option<SaveStatus>,
}

/// Fill the record set with fake faculty, classes, students and marks.
///
/// Everything goes through the record services so the usual checks apply.
/// Existing records are kept; new usernames and class names avoid them.
pub fn seed_records(state: &mut AppState, counts: &SeedCounts) -> Result<SeedReport, RecordError> {
    let mut report = SeedReport::default();

    for _ in 0..counts.faculties {
        let username = unused_username(state);
        let password = new_temporary_password(&mut state.rng, DEFAULT_PASSWORD_LEN);
        let name: String = Name().fake();

        let committed = FacultyService::register_faculty(
            state,
            RegisterFacultyDto::new(username, name, password.clone()),
        )?;
        report.save = Some(committed.save);
        let session = Session::Faculty {
            username: committed.value.clone(),
        };
        report.faculties.push((committed.value, password));

        for _ in 0..counts.classes_per_faculty {
            let Some(class_name) = unused_class_name(state) else {
                break;
            };
            let committed =
                ClassService::create_class(state, &session, CreateClassDto::new(class_name))?;
            report.save = Some(committed.save);
            let class_id = committed.value;
            report.classes += 1;

            for subject in DEFAULT_SUBJECTS {
                let committed = ClassService::add_subject(
                    state,
                    &session,
                    class_id.as_str(),
                    AddSubjectDto::new(subject),
                )?;
                report.save = Some(committed.save);
            }

            for roll in 1..=counts.students_per_class {
                let name: String = Name().fake();
                let committed = StudentService::enroll_student(
                    state,
                    &session,
                    class_id.as_str(),
                    EnrollStudentDto::new(roll.to_string(), name),
                )?;
                report.save = Some(committed.save);
                let enrolled = committed.value;

                let marks: Vec<(String, i64)> = DEFAULT_SUBJECTS
                    .iter()
                    .map(|subject| (subject.to_string(), state.rng.gen_range(35..=100)))
                    .collect();
                let committed =
                    MarkService::set_marks(state, &session, enrolled.id.as_str(), &marks)?;
                report.save = Some(committed.save);
                report.students.push(enrolled);
            }
        }
    }

    info!(
        faculties = report.faculties.len(),
        classes = report.classes,
        students = report.students.len(),
        "Seeding finished"
    );
    Ok(report)
}

fn unused_username(state: &mut AppState) -> String {
    loop {
        let first: String = FirstName().fake();
        let candidate = format!(
            "{}{}",
            first.to_ascii_lowercase(),
            state.rng.gen_range(10..100)
        );
        if state.snapshot.faculty(&candidate).is_none() {
            return candidate;
        }
    }
}

/// A free `<grade><section>` name, or `None` once every one is taken.
fn unused_class_name(state: &mut AppState) -> Option<String> {
    let free: Vec<String> = (1..=12)
        .flat_map(|grade| ('A'..='F').map(move |section| format!("{}{}", grade, section)))
        .filter(|name| state.snapshot.class_named(name).is_none())
        .collect();
    if free.is_empty() {
        return None;
    }
    let pick = state.rng.gen_range(0..free.len());
    free.into_iter().nth(pick)
}
