//! Session checks shared by the record services.
//!
//! Every guard reads the snapshot only. A failing guard returns before the
//! calling service touches any record.

use classrank_core::RecordError;
use classrank_models::{Class, ClassId, Session, Snapshot, Student, StudentId, Username};

/// The session's faculty username, provided the account still exists.
pub(crate) fn require_faculty<'a>(
    snapshot: &Snapshot,
    session: &'a Session,
) -> Result<&'a Username, RecordError> {
    let username = session
        .faculty()
        .ok_or_else(|| RecordError::forbidden("faculty access required"))?;
    if snapshot.faculty(username.as_str()).is_none() {
        return Err(RecordError::AuthFailed);
    }
    Ok(username)
}

/// Look up a class and check the session's faculty owns it.
///
/// A missing class is reported before ownership so callers see `NotFound`
/// for an unknown id regardless of who asks.
pub(crate) fn require_class_owner<'a>(
    snapshot: &'a Snapshot,
    session: &Session,
    class_id: &str,
) -> Result<(&'a ClassId, &'a Class), RecordError> {
    let (id, class) = snapshot
        .classes
        .get_key_value(class_id)
        .ok_or_else(|| RecordError::not_found(format!("Class '{}'", class_id)))?;
    let username = require_faculty(snapshot, session)?;
    if !class.is_owned_by(username) {
        return Err(RecordError::forbidden(format!(
            "class '{}' belongs to another faculty",
            class.name
        )));
    }
    Ok((id, class))
}

/// Look up a student and check the session may read their record.
///
/// Students may only read themselves, and only after their first password
/// change. Faculty may read students enrolled in a class they own.
pub(crate) fn require_student_reader<'a>(
    snapshot: &'a Snapshot,
    session: &Session,
    student_id: &str,
) -> Result<(&'a StudentId, &'a Student), RecordError> {
    let (id, student) = snapshot
        .students
        .get_key_value(student_id)
        .ok_or_else(|| RecordError::not_found(format!("Student '{}'", student_id)))?;

    match session {
        Session::Student { id: own } => {
            if own != id {
                return Err(RecordError::forbidden("students may only view their own record"));
            }
            if student.first_login {
                return Err(RecordError::PasswordChangeRequired);
            }
        }
        Session::Faculty { .. } => {
            let username = require_faculty(snapshot, session)?;
            let owned = student
                .class_id
                .as_ref()
                .and_then(|cid| snapshot.class(cid.as_str()))
                .is_some_and(|class| class.is_owned_by(username));
            if !owned {
                return Err(RecordError::forbidden(format!(
                    "student '{}' is not in one of your classes",
                    id
                )));
            }
        }
    }
    Ok((id, student))
}
