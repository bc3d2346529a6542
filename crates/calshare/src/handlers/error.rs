use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calshare_auth::AuthError;
use calshare_core::service::{service_error_to_status_code, ServiceError};
use calshare_core::storage::{repository_error_to_status_code, RepositoryError};

use super::authz::AccessDenied;

/// Handler error wrapping `anyhow::Error`.
///
/// The status code is picked by downcasting to the typed errors of the
/// lower layers; anything unrecognised is a 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if self.0.is::<AccessDenied>() {
            403
        } else if let Some(service_error) = self.0.downcast_ref::<ServiceError>() {
            service_error_to_status_code(service_error)
        } else if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let err = match self.0.downcast::<AuthError>() {
            Ok(auth_error) => return auth_error.into_response(),
            Err(err) => AppError(err),
        };

        let status_code = err.status_code();
        if status_code.is_server_error() {
            tracing::error!(error = %err.0, "Request failed");
        }

        (
            status_code,
            Json(serde_json::json!({ "error": err.0.to_string() })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calshare_core::access::PermissionType;
    use calshare_core::calendar::ValidationError;
    use uuid::Uuid;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_typed_errors_pick_status() {
        assert_eq!(
            status_of(AccessDenied::calendar(Uuid::new_v4(), PermissionType::Read)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ServiceError::not_found("Calendar", Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ServiceError::from(ValidationError::DuplicateEmail)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RepositoryError::already_exists("Sharing", "x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AuthError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_unknown_error_is_internal() {
        assert_eq!(
            status_of(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
