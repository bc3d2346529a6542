use axum::{extract::State, Json};

use calshare_auth::AuthError;
use calshare_core::service;
use calshare_core::storage::with_transaction;

use crate::{
    models::{LoginRequest, TokenResponse},
    state::AppState,
};

use super::AppError;

/// Exchange email and password for a bearer token (POST /api/login).
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = payload.email.clone();
    let user = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move { Ok::<_, AppError>(service::find_user_by_email(uow, &email).await?) })
    })
    .await?;

    let Some(user) = user else {
        tracing::debug!("Login failed: unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };
    if !payload.verify(user.password_hash.clone()).await? {
        tracing::debug!(user_id = %user.id, "Login failed: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let access_token = state.auth.issue_token(user.id)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenResponse::bearer(access_token)))
}
