use uuid::Uuid;

use crate::calendar::{CreateSharingRequest, Sharing, UpdateSharingRequest};
use crate::storage::Store;

use super::{Result, ServiceError};

/// Shares a calendar with a user.
///
/// Both the calendar and the target user must exist, and the pair must not
/// already have a sharing. The conflict check runs before anything is
/// written.
pub async fn share_calendar<S>(store: &S, request: CreateSharingRequest) -> Result<Sharing>
where
    S: Store + ?Sized,
{
    if store.get_calendar(request.calendar_id).await?.is_none() {
        return Err(ServiceError::not_found("Calendar", request.calendar_id));
    }
    if store.get_user(request.shared_with_id).await?.is_none() {
        return Err(ServiceError::not_found("User", request.shared_with_id));
    }
    if store
        .find_sharing(request.calendar_id, request.shared_with_id)
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "calendar {} is already shared with user {}",
            request.calendar_id, request.shared_with_id
        )));
    }

    let sharing = request.into_sharing();
    store.create_sharing(&sharing).await?;
    tracing::info!(
        sharing_id = %sharing.id,
        calendar_id = %sharing.calendar_id,
        shared_with_id = %sharing.shared_with_id,
        permissions = %sharing.permissions,
        "Shared calendar"
    );
    Ok(sharing)
}

/// Gets a sharing, failing with `NotFound` if absent.
pub async fn get_sharing<S>(store: &S, id: Uuid) -> Result<Sharing>
where
    S: Store + ?Sized,
{
    store
        .get_sharing(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Sharing", id))
}

/// Lists the sharings of a calendar.
pub async fn sharings_for_calendar<S>(store: &S, calendar_id: Uuid) -> Result<Vec<Sharing>>
where
    S: Store + ?Sized,
{
    Ok(store.find_sharings_by_calendar(calendar_id).await?)
}

/// Applies a partial update to a sharing and returns the updated record.
pub async fn update_sharing<S>(store: &S, id: Uuid, update: UpdateSharingRequest) -> Result<Sharing>
where
    S: Store + ?Sized,
{
    let mut sharing = get_sharing(store, id).await?;
    update.apply_to(&mut sharing);

    store.update_sharing(id, &update).await?;
    tracing::info!(sharing_id = %id, "Updated sharing");
    Ok(sharing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CreateCalendarRequest, NewUser, Permission, User};
    use crate::service::{create_calendar, register_user};
    use crate::storage::{InMemoryStore, TransactionManager, UnitOfWork};

    async fn user(uow: &dyn UnitOfWork, email: &str) -> User {
        let new_user = NewUser {
            name: "Someone".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        };
        register_user(uow, new_user).await.unwrap()
    }

    async fn setup(uow: &dyn UnitOfWork) -> (Uuid, User) {
        let owner = user(uow, "owner@example.com").await;
        let friend = user(uow, "friend@example.com").await;
        let calendar = create_calendar(uow, owner.id, CreateCalendarRequest::new("Work"))
            .await
            .unwrap();
        (calendar.id, friend)
    }

    #[tokio::test]
    async fn test_share_calendar() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();
        let (calendar_id, friend) = setup(uow.as_ref()).await;

        let sharing = share_calendar(
            uow.as_ref(),
            CreateSharingRequest::new(calendar_id, friend.id, Permission::Read),
        )
        .await
        .unwrap();

        assert_eq!(
            sharings_for_calendar(uow.as_ref(), calendar_id).await.unwrap(),
            vec![sharing.clone()]
        );
        assert_eq!(get_sharing(uow.as_ref(), sharing.id).await.unwrap(), sharing);
    }

    #[tokio::test]
    async fn test_duplicate_sharing_conflicts_before_write() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();
        let (calendar_id, friend) = setup(uow.as_ref()).await;
        let first = share_calendar(
            uow.as_ref(),
            CreateSharingRequest::new(calendar_id, friend.id, Permission::Read),
        )
        .await
        .unwrap();

        let result = share_calendar(
            uow.as_ref(),
            CreateSharingRequest::new(calendar_id, friend.id, Permission::ReadWrite)
                .with_public(true),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert_eq!(
            sharings_for_calendar(uow.as_ref(), calendar_id).await.unwrap(),
            vec![first]
        );
    }

    #[tokio::test]
    async fn test_share_missing_calendar_or_user() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();
        let (calendar_id, friend) = setup(uow.as_ref()).await;

        let missing_calendar = share_calendar(
            uow.as_ref(),
            CreateSharingRequest::new(Uuid::new_v4(), friend.id, Permission::Read),
        )
        .await;
        assert!(matches!(
            missing_calendar,
            Err(ServiceError::NotFound {
                entity_type: "Calendar",
                ..
            })
        ));

        let missing_user = share_calendar(
            uow.as_ref(),
            CreateSharingRequest::new(calendar_id, Uuid::new_v4(), Permission::Read),
        )
        .await;
        assert!(matches!(
            missing_user,
            Err(ServiceError::NotFound {
                entity_type: "User",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_update_sharing_changes_only_given_fields() {
        let store = InMemoryStore::new();
        let uow = store.begin().await.unwrap();
        let (calendar_id, friend) = setup(uow.as_ref()).await;
        let sharing = share_calendar(
            uow.as_ref(),
            CreateSharingRequest::new(calendar_id, friend.id, Permission::Read),
        )
        .await
        .unwrap();

        let update = UpdateSharingRequest {
            permissions: Some(Permission::ReadWrite),
            public: None,
        };
        let updated = update_sharing(uow.as_ref(), sharing.id, update).await.unwrap();

        assert_eq!(updated.permissions, Permission::ReadWrite);
        assert!(!updated.public);
        assert_eq!(updated.shared_with_id, friend.id);
        assert_eq!(get_sharing(uow.as_ref(), sharing.id).await.unwrap(), updated);
    }
}
