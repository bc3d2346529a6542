use thiserror::Error;

use crate::calendar::ValidationError;
use crate::storage::{repository_error_to_status_code, RepositoryError};

/// Errors returned by the account and calendar services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Conflict` -> 409 (Conflict)
/// - `Validation` -> 400 (Bad Request)
/// - `Repository` -> see [`repository_error_to_status_code`]
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::NotFound { .. } => 404,
        ServiceError::Conflict(_) => 409,
        ServiceError::Validation(_) => 400,
        ServiceError::Repository(err) => repository_error_to_status_code(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            service_error_to_status_code(&ServiceError::not_found("Calendar", "abc")),
            404
        );
        assert_eq!(
            service_error_to_status_code(&ServiceError::Conflict("duplicate".into())),
            409
        );
        assert_eq!(
            service_error_to_status_code(&ValidationError::DuplicateEmail.into()),
            400
        );
        assert_eq!(
            service_error_to_status_code(
                &RepositoryError::TransactionFailed("commit".into()).into()
            ),
            500
        );
        assert_eq!(
            service_error_to_status_code(&RepositoryError::not_found("Event", "x").into()),
            404
        );
    }

    #[test]
    fn test_validation_display() {
        let error = ServiceError::from(ValidationError::InvalidTimeRange);
        assert!(error.to_string().starts_with("Validation failed: "));
    }
}
