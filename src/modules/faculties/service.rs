use tracing::{info, instrument};

use classrank_core::RecordError;
use classrank_models::{Faculty, RegisterFacultyDto, Username, validate_dto};

use crate::state::{AppState, Committed};

pub struct FacultyService;

impl FacultyService {
    /// Create a faculty account. Usernames are unique and case-sensitive.
    #[instrument(skip(state, dto), fields(username = %dto.username.trim()))]
    pub fn register_faculty(
        state: &mut AppState,
        dto: RegisterFacultyDto,
    ) -> Result<Committed<Username>, RecordError> {
        let dto = dto.normalized();
        validate_dto(&dto)?;

        if state.snapshot.faculties.contains_key(dto.username.as_str()) {
            return Err(RecordError::DuplicateUsername(dto.username));
        }

        let username = Username::new(dto.username);
        state.snapshot.faculties.insert(
            username.clone(),
            Faculty {
                name: dto.name,
                password: dto.password,
            },
        );
        info!(username = %username, "Faculty registered");

        Ok(state.commit(username))
    }
}
