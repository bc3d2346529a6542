use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use calshare_auth::CurrentUser;
use calshare_core::calendar::{CreateSharingRequest, Sharing, UpdateSharingRequest};
use calshare_core::service;
use calshare_core::storage::with_transaction;

use crate::{models::SharingsQuery, state::AppState};

use super::{authz::require_calendar_owner, AppError};

/// Share one of the caller's calendars (POST /api/sharings).
pub async fn create_sharing(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<CreateSharingRequest>,
) -> Result<(StatusCode, Json<Sharing>), AppError> {
    let sharing = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            require_calendar_owner(uow, user_id, payload.calendar_id).await?;
            Ok::<_, AppError>(service::share_calendar(uow, payload).await?)
        })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(sharing)))
}

/// List the sharings of one of the caller's calendars (GET /api/sharings?calendar_id=).
pub async fn list_sharings(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<SharingsQuery>,
) -> Result<Json<Vec<Sharing>>, AppError> {
    let sharings = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            require_calendar_owner(uow, user_id, query.calendar_id).await?;
            Ok::<_, AppError>(service::sharings_for_calendar(uow, query.calendar_id).await?)
        })
    })
    .await?;

    Ok(Json(sharings))
}

/// Update a sharing of one of the caller's calendars (PUT /api/sharings/{id}).
pub async fn update_sharing(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSharingRequest>,
) -> Result<Json<Sharing>, AppError> {
    let sharing = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            let sharing = service::get_sharing(uow, id).await?;
            require_calendar_owner(uow, user_id, sharing.calendar_id).await?;
            Ok::<_, AppError>(service::update_sharing(uow, id, payload).await?)
        })
    })
    .await?;

    Ok(Json(sharing))
}

/// Revoke a sharing of one of the caller's calendars (DELETE /api/sharings/{id}).
pub async fn delete_sharing(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            let sharing = service::get_sharing(uow, id).await?;
            require_calendar_owner(uow, user_id, sharing.calendar_id).await?;
            Ok::<_, AppError>(service::delete_sharing(uow, id).await?)
        })
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
