use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use calshare_core::access::PermissionType;
use calshare_core::calendar::{CreateEventRequest, Event, UpdateEventRequest};
use calshare_core::service;
use calshare_core::storage::with_transaction;

use crate::{context::RequestContext, state::AppState};

use super::{
    authz::{require_calendar_permission, require_event_permission},
    AppError,
};

/// Create an event in a calendar the caller can write (POST /api/events).
pub async fn create_event(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            let calendar_id = payload.calendar_id;
            require_calendar_permission(uow, &ctx, calendar_id, PermissionType::Write).await?;
            Ok::<_, AppError>(service::create_event(uow, payload).await?)
        })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event (GET /api/events/{id}).
pub async fn get_event(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    let event = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            require_event_permission(uow, &ctx, id, PermissionType::Read).await?;
            Ok::<_, AppError>(service::get_event(uow, id).await?)
        })
    })
    .await?;

    Ok(Json(event))
}

/// Update an event (PUT /api/events/{id}).
pub async fn update_event(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<Event>, AppError> {
    let event = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            require_event_permission(uow, &ctx, id, PermissionType::Write).await?;
            Ok::<_, AppError>(service::update_event(uow, id, payload).await?)
        })
    })
    .await?;

    Ok(Json(event))
}

/// Delete an event (DELETE /api/events/{id}).
pub async fn delete_event(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            require_event_permission(uow, &ctx, id, PermissionType::Write).await?;
            Ok::<_, AppError>(service::delete_event(uow, id).await?)
        })
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
