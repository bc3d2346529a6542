//! Authorization helpers for API handlers.
//!
//! Calendar and event routes are checked with the permission resolver;
//! sharing management is reserved to the calendar's owner. Denials map to
//! 403 Forbidden.

use thiserror::Error;
use uuid::Uuid;

use calshare_core::access::{
    resolve_calendar_permission, resolve_event_permission, PermissionType,
};
use calshare_core::calendar::Calendar;
use calshare_core::service;
use calshare_core::storage::Store;

use crate::context::RequestContext;

use super::AppError;

/// The requester may not perform the operation.
#[derive(Debug, Error)]
#[error("Requires {required} permission on {resource} {id}")]
pub struct AccessDenied {
    resource: &'static str,
    id: Uuid,
    required: &'static str,
}

impl AccessDenied {
    pub fn calendar(id: Uuid, required: PermissionType) -> Self {
        Self {
            resource: "calendar",
            id,
            required: permission_name(required),
        }
    }

    pub fn event(id: Uuid, required: PermissionType) -> Self {
        Self {
            resource: "event",
            id,
            required: permission_name(required),
        }
    }

    pub fn owner(resource: &'static str, id: Uuid) -> Self {
        Self {
            resource,
            id,
            required: "owner",
        }
    }
}

fn permission_name(permission_type: PermissionType) -> &'static str {
    match permission_type {
        PermissionType::Read => "read",
        PermissionType::Write => "write",
    }
}

/// Requires `permission_type` on a calendar.
///
/// A calendar that does not exist is denied like any other.
pub async fn require_calendar_permission<S>(
    store: &S,
    ctx: &RequestContext,
    calendar_id: Uuid,
    permission_type: PermissionType,
) -> Result<(), AppError>
where
    S: Store + ?Sized,
{
    let granted = resolve_calendar_permission(
        store,
        ctx.user_id,
        ctx.sharing_code.as_deref(),
        calendar_id,
        permission_type,
    )
    .await?;

    if !granted {
        tracing::warn!(
            request_id = %ctx.request_id,
            calendar_id = %calendar_id,
            permission = %permission_type,
            "Authorization denied"
        );
        return Err(AccessDenied::calendar(calendar_id, permission_type).into());
    }
    Ok(())
}

/// Requires `permission_type` on an event.
pub async fn require_event_permission<S>(
    store: &S,
    ctx: &RequestContext,
    event_id: Uuid,
    permission_type: PermissionType,
) -> Result<(), AppError>
where
    S: Store + ?Sized,
{
    let granted = resolve_event_permission(
        store,
        ctx.user_id,
        ctx.sharing_code.as_deref(),
        event_id,
        permission_type,
    )
    .await?;

    if !granted {
        tracing::warn!(
            request_id = %ctx.request_id,
            event_id = %event_id,
            permission = %permission_type,
            "Authorization denied"
        );
        return Err(AccessDenied::event(event_id, permission_type).into());
    }
    Ok(())
}

/// Requires `user_id` to own the calendar and returns it.
///
/// Unlike the permission checks, a missing calendar is a 404.
pub async fn require_calendar_owner<S>(
    store: &S,
    user_id: Uuid,
    calendar_id: Uuid,
) -> Result<Calendar, AppError>
where
    S: Store + ?Sized,
{
    let calendar = service::get_calendar(store, calendar_id).await?;
    if !calendar.is_owned_by(user_id) {
        tracing::warn!(
            user_id = %user_id,
            calendar_id = %calendar_id,
            "Authorization denied: not the calendar owner"
        );
        return Err(AccessDenied::owner("calendar", calendar_id).into());
    }
    Ok(calendar)
}
