//! Helpers for turning `validator` failures into record errors.

use classrank_core::errors::RecordError;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    // field_errors() is backed by a HashMap
    messages.sort();
    messages.join(", ")
}

/// Validate a DTO, mapping any failure to [`RecordError::InvalidInput`].
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), RecordError> {
    dto.validate()
        .map_err(|errors| RecordError::InvalidInput(format_errors(&errors)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name cannot be empty"))]
        name: String,
        #[validate(length(min = 1))]
        code: String,
    }

    #[test]
    fn test_valid_dto_passes() {
        let dto = Sample {
            name: "x".into(),
            code: "y".into(),
        };
        assert!(validate_dto(&dto).is_ok());
    }

    #[test]
    fn test_messages_are_collected() {
        let dto = Sample {
            name: String::new(),
            code: String::new(),
        };
        match validate_dto(&dto) {
            Err(RecordError::InvalidInput(msg)) => {
                assert!(msg.contains("name cannot be empty"));
                assert!(msg.contains("code is invalid"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
