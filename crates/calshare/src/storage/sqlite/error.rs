//! SQLite error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `calshare_core::storage`.
//! Specific errors are mapped to semantic variants (e.g., UNIQUE constraint to AlreadyExists).

use calshare_core::storage::RepositoryError;
use sqlx::error::ErrorKind;

/// Maps a sqlx error with a known ID to a RepositoryError.
///
/// # Error Mapping
///
/// - UNIQUE / PRIMARY KEY violations → `RepositoryError::AlreadyExists`
/// - FOREIGN KEY violations → `RepositoryError::InvalidData`
/// - `RowNotFound` → `RepositoryError::NotFound`
/// - Pool and I/O errors → `RepositoryError::ConnectionFailed`
/// - Decode errors → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str, id: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => RepositoryError::already_exists(entity_type, id),
            ErrorKind::ForeignKeyViolation => RepositoryError::InvalidData(format!(
                "Foreign key constraint violation for {entity_type}"
            )),
            _ => RepositoryError::QueryFailed(err.to_string()),
        },
        sqlx::Error::RowNotFound => RepositoryError::not_found(entity_type, id),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(err.to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::Serialization(err.to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps errors raised while beginning, committing or rolling back.
pub fn map_transaction_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(err.to_string())
        }
        _ => RepositoryError::TransactionFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_maps_to_not_found() {
        let result = map_sqlx_error(sqlx::Error::RowNotFound, "Calendar", "abc-123");

        match result {
            RepositoryError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Calendar");
                assert_eq!(id, "abc-123");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_pool_errors_map_to_connection_failed() {
        let result = map_sqlx_error(sqlx::Error::PoolClosed, "User", "abc-123");
        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));

        let result = map_transaction_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_other_errors_map_to_query_failed() {
        let err = sqlx::Error::Protocol("unexpected".to_string());

        let result = map_sqlx_error(err, "Event", "abc-123");
        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }

    #[test]
    fn test_other_transaction_errors_map_to_transaction_failed() {
        let err = sqlx::Error::Protocol("unexpected".to_string());

        let result = map_transaction_error(err);
        assert!(matches!(result, RepositoryError::TransactionFailed(_)));
    }
}
