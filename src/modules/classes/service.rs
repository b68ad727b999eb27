use tracing::{debug, info, instrument};

use classrank_core::{RecordError, new_class_id};
use classrank_models::{
    AddSubjectDto, Class, ClassId, ClassName, CreateClassDto, Session, Snapshot, validate_dto,
};

use crate::access::{require_class_owner, require_faculty};
use crate::state::{AppState, Committed};

pub struct ClassService;

impl ClassService {
    /// Create an empty class owned by the session's faculty.
    ///
    /// Class names must look like `10A` and are unique across all faculty,
    /// ignoring case.
    #[instrument(skip(state, dto), fields(session = %session.key(), name = %dto.name))]
    pub fn create_class(
        state: &mut AppState,
        session: &Session,
        dto: CreateClassDto,
    ) -> Result<Committed<ClassId>, RecordError> {
        let owner = require_faculty(&state.snapshot, session)?.clone();
        let name = ClassName::new(&dto.name)?;

        if let Some((_, existing)) = state.snapshot.class_named(name.as_str()) {
            return Err(RecordError::DuplicateClassName(existing.name.clone()));
        }

        let class_id = loop {
            let candidate = ClassId::new(new_class_id(&mut state.rng));
            if !state.snapshot.classes.contains_key(&candidate) {
                break candidate;
            }
            debug!(class_id = %candidate, "Class id collision, drawing again");
        };

        state
            .snapshot
            .classes
            .insert(class_id.clone(), Class::new(name.into_inner(), owner));
        info!(class_id = %class_id, "Class created");

        Ok(state.commit(class_id))
    }

    /// Append a subject to a class owned by the session's faculty.
    ///
    /// Subject names are compared case-sensitively.
    #[instrument(skip(state, dto), fields(session = %session.key(), subject = %dto.subject))]
    pub fn add_subject(
        state: &mut AppState,
        session: &Session,
        class_id: &str,
        dto: AddSubjectDto,
    ) -> Result<Committed<()>, RecordError> {
        let (class_id, class) = require_class_owner(&state.snapshot, session, class_id)?;
        validate_dto(&dto)?;

        if class.offers(&dto.subject) {
            return Err(RecordError::DuplicateSubject(dto.subject));
        }

        let class_id = class_id.clone();
        if let Some(class) = state.snapshot.classes.get_mut(&class_id) {
            class.subjects.push(dto.subject);
        }
        info!(class_id = %class_id, "Subject added");

        Ok(state.commit(()))
    }

    /// Classes owned by the session's faculty, ordered by name.
    pub fn classes_for_faculty<'a>(
        snapshot: &'a Snapshot,
        session: &Session,
    ) -> Result<Vec<(&'a ClassId, &'a Class)>, RecordError> {
        let username = require_faculty(snapshot, session)?;
        Ok(snapshot.classes_of(username))
    }

    /// Find one of the session's classes by id, or by name ignoring case.
    pub fn resolve_class<'a>(
        snapshot: &'a Snapshot,
        session: &Session,
        key: &str,
    ) -> Result<(&'a ClassId, &'a Class), RecordError> {
        let key = key.trim();
        let class_id = match snapshot.classes.get_key_value(key) {
            Some((id, _)) => id,
            None => {
                snapshot
                    .class_named(key)
                    .ok_or_else(|| RecordError::not_found(format!("Class '{}'", key)))?
                    .0
            }
        };
        require_class_owner(snapshot, session, class_id.as_str())
    }
}
