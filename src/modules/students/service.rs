use tracing::{debug, info, instrument};

use classrank_core::credentials::DEFAULT_PASSWORD_LEN;
use classrank_core::{RecordError, new_student_id, new_temporary_password};
use classrank_models::{
    EnrollStudentDto, EnrolledStudent, ReportCard, RollNumber, Session, Snapshot, Student,
    StudentId, SubjectMark, validate_dto,
};

use crate::access::{require_class_owner, require_student_reader};
use crate::modules::ranking::RankingService;
use crate::state::{AppState, Committed};

pub struct StudentService;

impl StudentService {
    /// Enroll a new student into a class owned by the session's faculty.
    ///
    /// Returns the generated id and the temporary password. The password is
    /// not retrievable later except by reading the data file.
    #[instrument(skip(state, dto), fields(session = %session.key(), roll_no = %dto.roll_no.trim()))]
    pub fn enroll_student(
        state: &mut AppState,
        session: &Session,
        class_id: &str,
        dto: EnrollStudentDto,
    ) -> Result<Committed<EnrolledStudent>, RecordError> {
        let dto = dto.normalized();
        let (class_id, _) = require_class_owner(&state.snapshot, session, class_id)?;
        let class_id = class_id.clone();

        let roll = RollNumber::new(&dto.roll_no)?;
        if state.snapshot.roll_taken(&class_id, roll.as_str()) {
            return Err(RecordError::DuplicateRoll(roll.into_inner()));
        }
        validate_dto(&dto)?;

        let student_id = loop {
            let candidate = StudentId::new(new_student_id(&mut state.rng, roll.as_str()));
            if !state.snapshot.students.contains_key(&candidate) {
                break candidate;
            }
            debug!(student_id = %candidate, "Student id collision, drawing again");
        };
        let temporary_password = new_temporary_password(&mut state.rng, DEFAULT_PASSWORD_LEN);

        state.snapshot.students.insert(
            student_id.clone(),
            Student::enrolled(
                dto.name,
                temporary_password.clone(),
                class_id.clone(),
                roll.into_inner(),
            ),
        );
        if let Some(class) = state.snapshot.classes.get_mut(&class_id) {
            class.students.push(student_id.clone());
        }
        info!(student_id = %student_id, class_id = %class_id, "Student enrolled");

        Ok(state.commit(EnrolledStudent {
            id: student_id,
            temporary_password,
        }))
    }

    /// A student's marks, total and rank.
    ///
    /// Students may read only their own card, and only once their temporary
    /// password has been replaced. A record whose class is missing yields an
    /// empty card rather than an error.
    #[instrument(skip(snapshot), fields(session = %session.key()))]
    pub fn report_card(
        snapshot: &Snapshot,
        session: &Session,
        student_id: &str,
    ) -> Result<ReportCard, RecordError> {
        let (student_id, student) = require_student_reader(snapshot, session, student_id)?;

        let class = student
            .class_id
            .as_ref()
            .and_then(|cid| snapshot.class(cid.as_str()).map(|class| (cid, class)));

        let Some((class_id, class)) = class else {
            debug!(student_id = %student_id, "Student has no resolvable class");
            return Ok(ReportCard {
                student_id: student_id.clone(),
                name: student.name.clone(),
                roll_no: student.roll_no.clone(),
                class_id: None,
                class_name: None,
                marks: Vec::new(),
                total: 0,
                rank: None,
            });
        };

        let marks: Vec<SubjectMark> = class
            .subjects
            .iter()
            .map(|subject| SubjectMark {
                subject: subject.clone(),
                mark: student.mark(subject),
            })
            .collect();
        let standing = RankingService::compute_totals_and_ranks(snapshot, class_id.as_str())
            .remove(student_id);

        Ok(ReportCard {
            student_id: student_id.clone(),
            name: student.name.clone(),
            roll_no: student.roll_no.clone(),
            class_id: Some(class_id.clone()),
            class_name: Some(class.name.clone()),
            total: marks.iter().map(|m| u64::from(m.mark)).sum(),
            rank: standing.map(|s| s.rank),
            marks,
        })
    }
}
