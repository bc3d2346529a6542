use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use calshare_auth::CurrentUser;
use calshare_core::access::PermissionType;
use calshare_core::calendar::{Calendar, CreateCalendarRequest, Event, UpdateCalendarRequest};
use calshare_core::service;
use calshare_core::storage::{with_transaction, Store};

use crate::{context::RequestContext, models::CalendarWithEvents, state::AppState};

use super::{authz::require_calendar_permission, AppError};

async fn with_events<S>(store: &S, calendar: Calendar) -> Result<CalendarWithEvents, AppError>
where
    S: Store + ?Sized,
{
    let events = service::events_for_calendar(store, calendar.id).await?;
    Ok(CalendarWithEvents { calendar, events })
}

/// Create a calendar owned by the caller (POST /api/calendars).
pub async fn create_calendar(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<CreateCalendarRequest>,
) -> Result<(StatusCode, Json<Calendar>), AppError> {
    let calendar = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            Ok::<_, AppError>(service::create_calendar(uow, user_id, payload).await?)
        })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(calendar)))
}

/// List the caller's calendars with their events (GET /api/calendars).
pub async fn list_calendars(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<CalendarWithEvents>>, AppError> {
    let calendars = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            let mut calendars = Vec::new();
            for calendar in service::calendars_for_owner(uow, user_id).await? {
                calendars.push(with_events(uow, calendar).await?);
            }
            Ok::<_, AppError>(calendars)
        })
    })
    .await?;

    Ok(Json(calendars))
}

/// Get a calendar with its events (GET /api/calendars/{id}).
pub async fn get_calendar(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<CalendarWithEvents>, AppError> {
    let calendar = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            require_calendar_permission(uow, &ctx, id, PermissionType::Read).await?;
            let calendar = service::get_calendar(uow, id).await?;
            with_events(uow, calendar).await
        })
    })
    .await?;

    Ok(Json(calendar))
}

/// Update a calendar (PUT /api/calendars/{id}).
pub async fn update_calendar(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCalendarRequest>,
) -> Result<Json<Calendar>, AppError> {
    let calendar = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            require_calendar_permission(uow, &ctx, id, PermissionType::Write).await?;
            Ok::<_, AppError>(service::update_calendar(uow, id, payload).await?)
        })
    })
    .await?;

    Ok(Json(calendar))
}

/// Delete a calendar with its events and sharings (DELETE /api/calendars/{id}).
pub async fn delete_calendar(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            require_calendar_permission(uow, &ctx, id, PermissionType::Write).await?;
            Ok::<_, AppError>(service::delete_calendar(uow, id).await?)
        })
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the events of a calendar (GET /api/calendars/{id}/events).
pub async fn list_events(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = with_transaction(state.store.as_ref(), move |uow| {
        Box::pin(async move {
            require_calendar_permission(uow, &ctx, id, PermissionType::Read).await?;
            Ok::<_, AppError>(service::events_for_calendar(uow, id).await?)
        })
    })
    .await?;

    Ok(Json(events))
}
