use uuid::Uuid;

use crate::calendar::Sharing;
use crate::storage::{CalendarRepository, EventRepository, Result, SharingRepository};

use super::PermissionType;

/// Why a decision went the way it did. Only used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reason {
    CalendarNotFound,
    EventNotFound,
    PublicCalendar,
    Owner,
    NoSharingCode,
    SharingNotFound,
    PublicSharing,
    InsufficientPermission,
    SharedWithRequester,
    NotSharedWithRequester,
    SharingForOtherCalendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessDecision {
    Granted(Reason),
    Denied(Reason),
}

impl AccessDecision {
    fn is_granted(self) -> bool {
        matches!(self, AccessDecision::Granted(_))
    }

    fn reason(self) -> Reason {
        match self {
            AccessDecision::Granted(reason) | AccessDecision::Denied(reason) => reason,
        }
    }
}

/// Looks up the sharing a code points at. A code that is not a valid
/// sharing id behaves like a code for a sharing that does not exist.
async fn lookup_sharing<S>(store: &S, sharing_code: &str) -> Result<Option<Sharing>>
where
    S: SharingRepository + ?Sized,
{
    match Uuid::parse_str(sharing_code) {
        Ok(id) => store.get_sharing(id).await,
        Err(_) => Ok(None),
    }
}

/// Applies the sharing rules shared by calendars and events: a public
/// sharing grants outright, otherwise the permission must be satisfied and
/// the sharing must target the requester.
fn sharing_decision(
    sharing: &Sharing,
    logged_user_id: Option<Uuid>,
    permission_type: PermissionType,
) -> AccessDecision {
    if sharing.public {
        return AccessDecision::Granted(Reason::PublicSharing);
    }
    if !permission_type.is_satisfied_by(sharing.permissions) {
        return AccessDecision::Denied(Reason::InsufficientPermission);
    }
    if logged_user_id == Some(sharing.shared_with_id) {
        AccessDecision::Granted(Reason::SharedWithRequester)
    } else {
        AccessDecision::Denied(Reason::NotSharedWithRequester)
    }
}

async fn calendar_decision<S>(
    store: &S,
    logged_user_id: Option<Uuid>,
    sharing_code: Option<&str>,
    calendar_id: Uuid,
    permission_type: PermissionType,
) -> Result<AccessDecision>
where
    S: CalendarRepository + SharingRepository + ?Sized,
{
    let Some(calendar) = store.get_calendar(calendar_id).await? else {
        return Ok(AccessDecision::Denied(Reason::CalendarNotFound));
    };
    if calendar.public {
        return Ok(AccessDecision::Granted(Reason::PublicCalendar));
    }
    if logged_user_id.is_some_and(|user_id| calendar.is_owned_by(user_id)) {
        return Ok(AccessDecision::Granted(Reason::Owner));
    }
    let Some(sharing_code) = sharing_code else {
        return Ok(AccessDecision::Denied(Reason::NoSharingCode));
    };
    let Some(sharing) = lookup_sharing(store, sharing_code).await? else {
        return Ok(AccessDecision::Denied(Reason::SharingNotFound));
    };
    Ok(sharing_decision(&sharing, logged_user_id, permission_type))
}

async fn event_decision<S>(
    store: &S,
    logged_user_id: Option<Uuid>,
    sharing_code: Option<&str>,
    event_id: Uuid,
    permission_type: PermissionType,
) -> Result<AccessDecision>
where
    S: CalendarRepository + EventRepository + SharingRepository + ?Sized,
{
    let Some(event) = store.get_event(event_id).await? else {
        return Ok(AccessDecision::Denied(Reason::EventNotFound));
    };
    let Some(calendar) = store.get_calendar(event.calendar_id).await? else {
        return Ok(AccessDecision::Denied(Reason::CalendarNotFound));
    };
    if calendar.public {
        return Ok(AccessDecision::Granted(Reason::PublicCalendar));
    }
    let Some(sharing_code) = sharing_code else {
        return Ok(AccessDecision::Denied(Reason::NoSharingCode));
    };
    let Some(sharing) = lookup_sharing(store, sharing_code).await? else {
        return Ok(AccessDecision::Denied(Reason::SharingNotFound));
    };
    let decision = sharing_decision(&sharing, logged_user_id, permission_type);
    if decision == AccessDecision::Granted(Reason::SharedWithRequester)
        && sharing.calendar_id != event.calendar_id
    {
        return Ok(AccessDecision::Denied(Reason::SharingForOtherCalendar));
    }
    Ok(decision)
}

/// Decides whether the requester may access a calendar.
///
/// Grants when the calendar is public, when the logged-in user owns it, or
/// when the sharing code names a sharing that is public or that targets the
/// logged-in user with a sufficient permission.
pub async fn resolve_calendar_permission<S>(
    store: &S,
    logged_user_id: Option<Uuid>,
    sharing_code: Option<&str>,
    calendar_id: Uuid,
    permission_type: PermissionType,
) -> Result<bool>
where
    S: CalendarRepository + SharingRepository + ?Sized,
{
    let decision = calendar_decision(
        store,
        logged_user_id,
        sharing_code,
        calendar_id,
        permission_type,
    )
    .await?;

    tracing::debug!(
        calendar_id = %calendar_id,
        user_id = ?logged_user_id,
        permission = %permission_type,
        granted = decision.is_granted(),
        reason = ?decision.reason(),
        "Resolved calendar permission"
    );

    Ok(decision.is_granted())
}

/// Decides whether the requester may access an event.
///
/// Events follow their calendar's visibility. Ownership of the calendar is
/// not consulted; a private event is only reachable through a sharing of
/// the event's own calendar.
pub async fn resolve_event_permission<S>(
    store: &S,
    logged_user_id: Option<Uuid>,
    sharing_code: Option<&str>,
    event_id: Uuid,
    permission_type: PermissionType,
) -> Result<bool>
where
    S: CalendarRepository + EventRepository + SharingRepository + ?Sized,
{
    let decision = event_decision(
        store,
        logged_user_id,
        sharing_code,
        event_id,
        permission_type,
    )
    .await?;

    tracing::debug!(
        event_id = %event_id,
        user_id = ?logged_user_id,
        permission = %permission_type,
        granted = decision.is_granted(),
        reason = ?decision.reason(),
        "Resolved event permission"
    );

    Ok(decision.is_granted())
}
