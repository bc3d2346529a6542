//! Cascade deletion.
//!
//! Children are always removed before their parents: sharings and events
//! before their calendar, calendars and inbound sharings before their user.
//! Run these inside one unit of work so a failure part way leaves nothing
//! deleted.

use uuid::Uuid;

use crate::calendar::Calendar;
use crate::storage::Store;

use super::{get_calendar, get_user, Result, ServiceError};

async fn purge_calendar<S>(store: &S, calendar: &Calendar) -> Result<()>
where
    S: Store + ?Sized,
{
    let sharings = store.find_sharings_by_calendar(calendar.id).await?;
    for sharing in &sharings {
        store.delete_sharing(sharing.id).await?;
    }

    let events = store.find_events_by_calendar(calendar.id).await?;
    for event in &events {
        store.delete_event(event.id).await?;
    }

    store.delete_calendar(calendar.id).await?;
    tracing::debug!(
        calendar_id = %calendar.id,
        sharings = sharings.len(),
        events = events.len(),
        "Purged calendar"
    );
    Ok(())
}

/// Deletes a user together with every calendar they own (and those
/// calendars' sharings and events) and every sharing granted to them.
pub async fn delete_user<S>(store: &S, id: Uuid) -> Result<()>
where
    S: Store + ?Sized,
{
    get_user(store, id).await?;

    for calendar in store.find_calendars_by_owner(id).await? {
        purge_calendar(store, &calendar).await?;
    }

    for sharing in store.find_sharings_shared_with(id).await? {
        store.delete_sharing(sharing.id).await?;
    }

    store.delete_user(id).await?;
    tracing::info!(user_id = %id, "Deleted user");
    Ok(())
}

/// Deletes a calendar together with its sharings and events.
pub async fn delete_calendar<S>(store: &S, id: Uuid) -> Result<()>
where
    S: Store + ?Sized,
{
    let calendar = get_calendar(store, id).await?;
    purge_calendar(store, &calendar).await?;
    tracing::info!(calendar_id = %id, "Deleted calendar");
    Ok(())
}

/// Deletes a single event.
pub async fn delete_event<S>(store: &S, id: Uuid) -> Result<()>
where
    S: Store + ?Sized,
{
    if store.get_event(id).await?.is_none() {
        return Err(ServiceError::not_found("Event", id));
    }
    store.delete_event(id).await?;
    tracing::info!(event_id = %id, "Deleted event");
    Ok(())
}

/// Deletes a single sharing.
pub async fn delete_sharing<S>(store: &S, id: Uuid) -> Result<()>
where
    S: Store + ?Sized,
{
    if store.get_sharing(id).await?.is_none() {
        return Err(ServiceError::not_found("Sharing", id));
    }
    store.delete_sharing(id).await?;
    tracing::info!(sharing_id = %id, "Deleted sharing");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{
        CreateCalendarRequest, CreateEventRequest, CreateSharingRequest, NewUser, Permission, User,
    };
    use crate::service::{create_calendar, create_event, register_user, share_calendar};
    use crate::storage::{with_transaction, InMemoryStore, TransactionManager, UnitOfWork};
    use chrono::{Duration, Utc};

    async fn user(uow: &dyn UnitOfWork, email: &str) -> User {
        let new_user = NewUser {
            name: "Someone".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        };
        register_user(uow, new_user).await.unwrap()
    }

    async fn calendar_with_events(uow: &dyn UnitOfWork, owner: &User, events: usize) -> Calendar {
        let calendar = create_calendar(uow, owner.id, CreateCalendarRequest::new("Work"))
            .await
            .unwrap();
        let start = Utc::now();
        for i in 0..events {
            let at = start + Duration::hours(i as i64);
            create_event(uow, CreateEventRequest::new(calendar.id, format!("Event {i}"), at, at))
                .await
                .unwrap();
        }
        calendar
    }

    async fn share(uow: &dyn UnitOfWork, calendar: &Calendar, with: &User) -> Uuid {
        share_calendar(
            uow,
            CreateSharingRequest::new(calendar.id, with.id, Permission::Read),
        )
        .await
        .unwrap()
        .id
    }

    // ==================== Calendar Cascade Tests ====================

    #[tokio::test]
    async fn test_delete_calendar_leaves_no_events() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();
        let owner = user(uow.as_ref(), "owner@example.com").await;
        let friend = user(uow.as_ref(), "friend@example.com").await;
        let calendar = calendar_with_events(uow.as_ref(), &owner, 5).await;
        let sharing_id = share(uow.as_ref(), &calendar, &friend).await;

        delete_calendar(uow.as_ref(), calendar.id).await.unwrap();

        assert!(uow.get_calendar(calendar.id).await.unwrap().is_none());
        assert!(uow
            .find_events_by_calendar(calendar.id)
            .await
            .unwrap()
            .is_empty());
        assert!(uow.get_sharing(sharing_id).await.unwrap().is_none());
        assert!(uow.get_user(owner.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_calendar_keeps_other_calendars() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();
        let owner = user(uow.as_ref(), "owner@example.com").await;
        let doomed = calendar_with_events(uow.as_ref(), &owner, 2).await;
        let kept = calendar_with_events(uow.as_ref(), &owner, 3).await;

        delete_calendar(uow.as_ref(), doomed.id).await.unwrap();

        assert_eq!(uow.find_events_by_calendar(kept.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_missing_calendar() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();

        let result = delete_calendar(uow.as_ref(), Uuid::new_v4()).await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }

    // ==================== User Cascade Tests ====================

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();
        let owner = user(uow.as_ref(), "owner@example.com").await;
        let friend = user(uow.as_ref(), "friend@example.com").await;
        let work = calendar_with_events(uow.as_ref(), &owner, 2).await;
        let home = calendar_with_events(uow.as_ref(), &owner, 1).await;
        let outbound = share(uow.as_ref(), &work, &friend).await;
        let friends_calendar = calendar_with_events(uow.as_ref(), &friend, 1).await;
        let inbound = share(uow.as_ref(), &friends_calendar, &owner).await;

        delete_user(uow.as_ref(), owner.id).await.unwrap();

        assert!(uow.get_user(owner.id).await.unwrap().is_none());
        for calendar in [&work, &home] {
            assert!(uow.get_calendar(calendar.id).await.unwrap().is_none());
            assert!(uow
                .find_events_by_calendar(calendar.id)
                .await
                .unwrap()
                .is_empty());
        }
        assert!(uow.get_sharing(outbound).await.unwrap().is_none());
        assert!(uow.get_sharing(inbound).await.unwrap().is_none());

        assert!(uow.get_user(friend.id).await.unwrap().is_some());
        assert!(uow.get_calendar(friends_calendar.id).await.unwrap().is_some());
        assert_eq!(
            uow.find_events_by_calendar(friends_calendar.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();

        let result = delete_user(uow.as_ref(), Uuid::new_v4()).await;
        assert!(matches!(
            result,
            Err(ServiceError::NotFound {
                entity_type: "User",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_failed_scope_restores_cascaded_rows() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();
        let owner = user(uow.as_ref(), "owner@example.com").await;
        let calendar = calendar_with_events(uow.as_ref(), &owner, 3).await;
        uow.commit().await.unwrap();

        let owner_id = owner.id;
        let result: Result<()> = with_transaction(&store, move |uow| {
            Box::pin(async move {
                delete_user(uow, owner_id).await?;
                Err::<(), _>(ServiceError::Conflict("abort".to_string()))
            })
        })
        .await;
        assert!(result.is_err());

        let uow = store.begin().await.unwrap();
        assert!(uow.get_user(owner.id).await.unwrap().is_some());
        assert_eq!(
            uow.find_events_by_calendar(calendar.id)
                .await
                .unwrap()
                .len(),
            3
        );
    }

    // ==================== Single Entity Tests ====================

    #[tokio::test]
    async fn test_delete_event_and_sharing() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();
        let owner = user(uow.as_ref(), "owner@example.com").await;
        let friend = user(uow.as_ref(), "friend@example.com").await;
        let calendar = calendar_with_events(uow.as_ref(), &owner, 2).await;
        let sharing_id = share(uow.as_ref(), &calendar, &friend).await;
        let event_id = uow.find_events_by_calendar(calendar.id).await.unwrap()[0].id;

        delete_event(uow.as_ref(), event_id).await.unwrap();
        delete_sharing(uow.as_ref(), sharing_id).await.unwrap();

        assert!(uow.get_event(event_id).await.unwrap().is_none());
        assert_eq!(uow.find_events_by_calendar(calendar.id).await.unwrap().len(), 1);
        assert!(uow.get_sharing(sharing_id).await.unwrap().is_none());
        assert!(matches!(
            delete_event(uow.as_ref(), event_id).await,
            Err(ServiceError::NotFound { .. })
        ));
        assert!(matches!(
            delete_sharing(uow.as_ref(), sharing_id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }
}
