//! Axum extractors for authentication.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::{AuthError, AuthState};

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header_value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("non-ASCII authorization header".to_string()))?;

    header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("expected a Bearer token".to_string()))
}

/// Extractor for the authenticated user's id. Rejects with 401 if the
/// bearer token is missing or invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let token = bearer_token(&parts.headers)?;
        let user_id = auth_state.verify_token(token)?;
        Ok(CurrentUser(user_id))
    }
}

/// Extractor for an optionally authenticated user. A missing or invalid
/// bearer token yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalUser(pub Option<Uuid>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let user_id = match bearer_token(&parts.headers) {
            Ok(token) => match auth_state.verify_token(token) {
                Ok(user_id) => Some(user_id),
                Err(e) => {
                    tracing::debug!("Ignoring bearer token: {}", e);
                    None
                }
            },
            Err(_) => None,
        };

        Ok(OptionalUser(user_id))
    }
}
