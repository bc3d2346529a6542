//! Application state for auth.

use std::sync::Arc;

use axum::extract::FromRef;
use uuid::Uuid;

use crate::{issue_token, verify_token, AuthConfig, AuthError};

/// Shared state for auth extractors and the login handler.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub config: Arc<AuthConfig>,
}

impl AuthState {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Issues a bearer token for `user_id`.
    pub fn issue_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        issue_token(&self.config, user_id)
    }

    /// Verifies a bearer token and returns its user id.
    pub fn verify_token(&self, token: &str) -> Result<Uuid, AuthError> {
        verify_token(&self.config, token)
    }
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
