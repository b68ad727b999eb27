use tracing::{info, instrument, warn};

use classrank_core::RecordError;
use classrank_models::{
    ChangePasswordDto, LoginOutcome, Role, Session, Snapshot, validate_dto,
};

use crate::state::{AppState, Committed};

pub struct AuthService;

impl AuthService {
    /// Check credentials for a faculty username or a student id.
    ///
    /// Never mutates the snapshot. An unknown key and a wrong password fail
    /// the same way.
    #[instrument(skip(snapshot, password))]
    pub fn authenticate(
        snapshot: &Snapshot,
        role: Role,
        key: &str,
        password: &str,
    ) -> Result<LoginOutcome, RecordError> {
        let key = key.trim();
        let outcome = match role {
            Role::Faculty => snapshot
                .faculties
                .get_key_value(key)
                .filter(|(_, faculty)| password_matches(&faculty.password, password))
                .map(|(username, _)| LoginOutcome {
                    session: Session::Faculty {
                        username: username.clone(),
                    },
                    first_login_pending: false,
                }),
            Role::Student => snapshot
                .students
                .get_key_value(key)
                .filter(|(_, student)| password_matches(&student.password, password))
                .map(|(id, student)| LoginOutcome {
                    session: Session::Student { id: id.clone() },
                    first_login_pending: student.first_login,
                }),
        };

        match outcome {
            Some(outcome) => {
                info!(role = %role, key, "Login succeeded");
                Ok(outcome)
            }
            None => {
                warn!(role = %role, key, "Login failed");
                Err(RecordError::AuthFailed)
            }
        }
    }

    /// Replace a student's password and clear the first-login flag.
    ///
    /// Only the student themself may do this.
    #[instrument(skip(state, dto), fields(session = %session.key()))]
    pub fn change_password(
        state: &mut AppState,
        session: &Session,
        student_id: &str,
        dto: ChangePasswordDto,
    ) -> Result<Committed<()>, RecordError> {
        match session.student() {
            Some(own) if own == student_id => {}
            _ => {
                return Err(RecordError::forbidden(
                    "students may only change their own password",
                ));
            }
        }
        validate_dto(&dto)?;

        let student = state
            .snapshot
            .students
            .get_mut(student_id)
            .ok_or_else(|| RecordError::not_found(format!("Student '{}'", student_id)))?;
        student.password = dto.new_password;
        student.first_login = false;
        info!(student_id, "Password changed");

        Ok(state.commit(()))
    }
}

/// A record without a stored password never authenticates.
fn password_matches(stored: &str, supplied: &str) -> bool {
    !stored.is_empty() && stored == supplied
}
