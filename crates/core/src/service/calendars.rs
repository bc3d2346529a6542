use uuid::Uuid;

use crate::calendar::{validate_calendar, Calendar, CreateCalendarRequest, UpdateCalendarRequest};
use crate::storage::Store;

use super::{Result, ServiceError};

/// Creates a calendar owned by `owner_id`.
pub async fn create_calendar<S>(
    store: &S,
    owner_id: Uuid,
    request: CreateCalendarRequest,
) -> Result<Calendar>
where
    S: Store + ?Sized,
{
    if store.get_user(owner_id).await?.is_none() {
        return Err(ServiceError::not_found("User", owner_id));
    }

    let calendar = request.into_calendar(owner_id);
    validate_calendar(&calendar)?;

    store.create_calendar(&calendar).await?;
    tracing::info!(calendar_id = %calendar.id, owner_id = %owner_id, "Created calendar");
    Ok(calendar)
}

/// Gets a calendar, failing with `NotFound` if absent.
pub async fn get_calendar<S>(store: &S, id: Uuid) -> Result<Calendar>
where
    S: Store + ?Sized,
{
    store
        .get_calendar(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Calendar", id))
}

/// Lists the calendars owned by a user. An unknown user owns nothing.
pub async fn calendars_for_owner<S>(store: &S, owner_id: Uuid) -> Result<Vec<Calendar>>
where
    S: Store + ?Sized,
{
    Ok(store.find_calendars_by_owner(owner_id).await?)
}

/// Applies a partial update to a calendar and returns the updated record.
pub async fn update_calendar<S>(
    store: &S,
    id: Uuid,
    update: UpdateCalendarRequest,
) -> Result<Calendar>
where
    S: Store + ?Sized,
{
    let mut calendar = get_calendar(store, id).await?;
    update.apply_to(&mut calendar);
    validate_calendar(&calendar)?;

    store.update_calendar(id, &update).await?;
    tracing::info!(calendar_id = %id, "Updated calendar");
    Ok(calendar)
}
