use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use calshare_auth::CurrentUser;
use calshare_core::calendar::User;
use calshare_core::service;
use calshare_core::storage::with_transaction;

use crate::{
    models::{RegisterRequest, UpdateUserRequest},
    state::AppState,
};

use super::{authz::AccessDenied, AppError};

/// Register a new user (POST /api/users).
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let new_user = payload.into_new_user().await?;

    let user = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move { Ok::<_, AppError>(service::register_user(uow, new_user).await?) })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get the caller's own profile (GET /api/users/me).
pub async fn get_me(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<User>, AppError> {
    let user = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move { Ok::<_, AppError>(service::get_user(uow, user_id).await?) })
    })
    .await?;

    Ok(Json(user))
}

/// Update the caller's own profile (PUT /api/users/me).
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let update = payload.into_update().await?;

    let user = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(
            async move { Ok::<_, AppError>(service::update_user(uow, user_id, update).await?) },
        )
    })
    .await?;

    Ok(Json(user))
}

/// Delete a user with everything they own (DELETE /api/users/{id}).
///
/// Users may only delete themselves.
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if user_id != id {
        tracing::warn!(user_id = %user_id, target = %id, "Refused to delete another user");
        return Err(AccessDenied::owner("user", id).into());
    }

    with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move { Ok::<_, AppError>(service::delete_user(uow, id).await?) })
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
