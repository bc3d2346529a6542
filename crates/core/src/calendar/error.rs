use thiserror::Error;

/// Errors raised when user input fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
    #[error("{field} too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("End time must be after or equal to start time")]
    InvalidTimeRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::Empty { field: "name" }.to_string(),
            "name cannot be empty"
        );
        assert_eq!(
            ValidationError::TooLong {
                field: "title",
                max: 100
            }
            .to_string(),
            "title too long (max 100 characters)"
        );
        assert_eq!(
            ValidationError::DuplicateEmail.to_string(),
            "Email already registered"
        );
    }
}
