use serde::{Deserialize, Serialize};

use calshare_auth::{hash_password, verify_password, AuthError};
use calshare_core::calendar::{NewUser, UserUpdate};

/// Request payload for registering a user.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Hashes the password and converts the request into a new user.
    pub async fn into_new_user(self) -> Result<NewUser, AuthError> {
        let password_hash = spawn_hash(self.password).await?;
        Ok(NewUser {
            name: self.name,
            email: self.email,
            password_hash,
        })
    }
}

/// Request payload for updating the caller's own account.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Hashes a new password, if any, and converts the request into a user update.
    pub async fn into_update(self) -> Result<UserUpdate, AuthError> {
        let password_hash = match self.password {
            Some(password) => Some(spawn_hash(password).await?),
            None => None,
        };
        Ok(UserUpdate {
            name: self.name,
            email: self.email,
            password_hash,
        })
    }
}

/// Request payload for logging in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Checks the submitted password against a stored hash.
    pub async fn verify(self, password_hash: String) -> Result<bool, AuthError> {
        let password = self.password;
        tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?
    }
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

// Argon2 is CPU-bound; keep it off the async worker threads.
async fn spawn_hash(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
}
