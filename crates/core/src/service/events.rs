use uuid::Uuid;

use crate::calendar::{validate_event, CreateEventRequest, Event, UpdateEventRequest};
use crate::storage::Store;

use super::{Result, ServiceError};

/// Creates an event. The target calendar must exist.
pub async fn create_event<S>(store: &S, request: CreateEventRequest) -> Result<Event>
where
    S: Store + ?Sized,
{
    if store.get_calendar(request.calendar_id).await?.is_none() {
        return Err(ServiceError::not_found("Calendar", request.calendar_id));
    }

    let event = request.into_event();
    validate_event(&event)?;

    store.create_event(&event).await?;
    tracing::info!(event_id = %event.id, calendar_id = %event.calendar_id, "Created event");
    Ok(event)
}

/// Gets an event, failing with `NotFound` if absent.
pub async fn get_event<S>(store: &S, id: Uuid) -> Result<Event>
where
    S: Store + ?Sized,
{
    store
        .get_event(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Event", id))
}

/// Lists the events of a calendar ordered by start time.
pub async fn events_for_calendar<S>(store: &S, calendar_id: Uuid) -> Result<Vec<Event>>
where
    S: Store + ?Sized,
{
    if store.get_calendar(calendar_id).await?.is_none() {
        return Err(ServiceError::not_found("Calendar", calendar_id));
    }
    Ok(store.find_events_by_calendar(calendar_id).await?)
}

/// Applies a partial update to an event and returns the updated record.
///
/// The merged event must still end at or after its start.
pub async fn update_event<S>(store: &S, id: Uuid, update: UpdateEventRequest) -> Result<Event>
where
    S: Store + ?Sized,
{
    let mut event = get_event(store, id).await?;
    update.apply_to(&mut event);
    validate_event(&event)?;

    store.update_event(id, &update).await?;
    tracing::info!(event_id = %id, "Updated event");
    Ok(event)
}
