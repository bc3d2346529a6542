use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Auth errors for the calshare_auth crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token on a request that requires one.
    #[error("missing bearer token")]
    MissingCredentials,

    /// Email/password pair did not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Bearer token is malformed, expired, or signed with another key.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Signing a new token failed.
    #[error("token creation failed: {0}")]
    TokenCreation(String),

    /// Hashing or parsing a password hash failed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::MissingCredentials
            | AuthError::InvalidCredentials
            | AuthError::InvalidToken(_) => {
                tracing::debug!("Rejected credentials: {}", self);
                (
                    StatusCode::UNAUTHORIZED,
                    [(WWW_AUTHENTICATE, "Bearer")],
                    self.to_string(),
                )
                    .into_response()
            }
            AuthError::TokenCreation(_) | AuthError::PasswordHash(_) => {
                tracing::error!("Auth error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_are_unauthorized() {
        for error in [
            AuthError::MissingCredentials,
            AuthError::InvalidCredentials,
            AuthError::InvalidToken("ExpiredSignature".to_string()),
        ] {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
        }
    }

    #[test]
    fn test_internal_errors_are_500() {
        let response = AuthError::PasswordHash("bad salt".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
