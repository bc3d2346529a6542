//! Transaction scope helper.

use futures_util::future::BoxFuture;

use super::{RepositoryError, TransactionManager, UnitOfWork};

/// Runs `work` inside a fresh unit of work.
///
/// Commits when `work` returns `Ok` and propagates any commit error.
/// Rolls back when `work` returns `Err`; a failed rollback is logged and
/// the original error is returned. If the returned future is dropped
/// before completion, the unit of work is dropped uncommitted and rolls
/// back on its own.
///
/// ```rust,ignore
/// let calendar = with_transaction(manager, move |uow| {
///     Box::pin(async move { service::create_calendar(uow, owner_id, request).await })
/// })
/// .await?;
/// ```
pub async fn with_transaction<T, E, F>(manager: &dyn TransactionManager, work: F) -> Result<T, E>
where
    F: for<'u> FnOnce(&'u dyn UnitOfWork) -> BoxFuture<'u, Result<T, E>>,
    E: From<RepositoryError>,
{
    let uow = manager.begin().await?;

    let outcome = work(uow.as_ref()).await;
    match outcome {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = uow.rollback().await {
                tracing::warn!(error = %rollback_err, "Failed to roll back unit of work");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{
        Calendar, Event, Sharing, UpdateCalendarRequest, UpdateEventRequest, UpdateSharingRequest,
        User, UserUpdate,
    };
    use crate::storage::{
        CalendarRepository, EventRepository, InMemoryStore, SharingRepository, UserRepository,
    };
    use async_trait::async_trait;
    use uuid::Uuid;

    type RepoResult<T> = crate::storage::Result<T>;

    /// Hands out units of work whose commit always fails.
    struct FailingCommitStore(InMemoryStore);

    #[async_trait]
    impl TransactionManager for FailingCommitStore {
        async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>> {
            Ok(Box::new(FailingCommit(self.0.begin().await?)))
        }
    }

    struct FailingCommit(Box<dyn UnitOfWork>);

    #[async_trait]
    impl UnitOfWork for FailingCommit {
        async fn commit(self: Box<Self>) -> RepoResult<()> {
            self.0.rollback().await?;
            Err(RepositoryError::TransactionFailed("disk full".to_string()))
        }

        async fn rollback(self: Box<Self>) -> RepoResult<()> {
            self.0.rollback().await
        }
    }

    #[async_trait]
    impl UserRepository for FailingCommit {
        async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
            self.0.get_user(id).await
        }
        async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
            self.0.find_user_by_email(email).await
        }
        async fn create_user(&self, user: &User) -> RepoResult<()> {
            self.0.create_user(user).await
        }
        async fn update_user(&self, id: Uuid, update: &UserUpdate) -> RepoResult<()> {
            self.0.update_user(id, update).await
        }
        async fn delete_user(&self, id: Uuid) -> RepoResult<()> {
            self.0.delete_user(id).await
        }
    }

    #[async_trait]
    impl CalendarRepository for FailingCommit {
        async fn get_calendar(&self, id: Uuid) -> RepoResult<Option<Calendar>> {
            self.0.get_calendar(id).await
        }
        async fn find_calendars_by_owner(&self, user_id: Uuid) -> RepoResult<Vec<Calendar>> {
            self.0.find_calendars_by_owner(user_id).await
        }
        async fn create_calendar(&self, calendar: &Calendar) -> RepoResult<()> {
            self.0.create_calendar(calendar).await
        }
        async fn update_calendar(&self, id: Uuid, update: &UpdateCalendarRequest) -> RepoResult<()> {
            self.0.update_calendar(id, update).await
        }
        async fn delete_calendar(&self, id: Uuid) -> RepoResult<()> {
            self.0.delete_calendar(id).await
        }
    }

    #[async_trait]
    impl EventRepository for FailingCommit {
        async fn get_event(&self, id: Uuid) -> RepoResult<Option<Event>> {
            self.0.get_event(id).await
        }
        async fn find_events_by_calendar(&self, calendar_id: Uuid) -> RepoResult<Vec<Event>> {
            self.0.find_events_by_calendar(calendar_id).await
        }
        async fn create_event(&self, event: &Event) -> RepoResult<()> {
            self.0.create_event(event).await
        }
        async fn update_event(&self, id: Uuid, update: &UpdateEventRequest) -> RepoResult<()> {
            self.0.update_event(id, update).await
        }
        async fn delete_event(&self, id: Uuid) -> RepoResult<()> {
            self.0.delete_event(id).await
        }
    }

    #[async_trait]
    impl SharingRepository for FailingCommit {
        async fn get_sharing(&self, id: Uuid) -> RepoResult<Option<Sharing>> {
            self.0.get_sharing(id).await
        }
        async fn find_sharing(
            &self,
            calendar_id: Uuid,
            shared_with_id: Uuid,
        ) -> RepoResult<Option<Sharing>> {
            self.0.find_sharing(calendar_id, shared_with_id).await
        }
        async fn find_sharings_by_calendar(&self, calendar_id: Uuid) -> RepoResult<Vec<Sharing>> {
            self.0.find_sharings_by_calendar(calendar_id).await
        }
        async fn find_sharings_shared_with(&self, user_id: Uuid) -> RepoResult<Vec<Sharing>> {
            self.0.find_sharings_shared_with(user_id).await
        }
        async fn create_sharing(&self, sharing: &Sharing) -> RepoResult<()> {
            self.0.create_sharing(sharing).await
        }
        async fn update_sharing(&self, id: Uuid, update: &UpdateSharingRequest) -> RepoResult<()> {
            self.0.update_sharing(id, update).await
        }
        async fn delete_sharing(&self, id: Uuid) -> RepoResult<()> {
            self.0.delete_sharing(id).await
        }
    }

    #[derive(Debug, PartialEq)]
    enum TestError {
        Repository(RepositoryError),
        Aborted,
    }

    impl From<RepositoryError> for TestError {
        fn from(err: RepositoryError) -> Self {
            TestError::Repository(err)
        }
    }

    #[tokio::test]
    async fn test_ok_commits() {
        let store = InMemoryStore::new();
        let user = User::new("Alice", "alice@example.com", "hash");
        let user_id = user.id;

        let result: Result<Uuid, TestError> = with_transaction(&store, move |uow| {
            Box::pin(async move {
                uow.create_user(&user).await?;
                Ok::<_, TestError>(user.id)
            })
        })
        .await;
        assert_eq!(result, Ok(user_id));

        let uow = store.begin().await.unwrap();
        assert!(uow.get_user(user_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_err_rolls_back_every_write() {
        let store = InMemoryStore::new();
        let user = User::new("Alice", "alice@example.com", "hash");
        let calendar = Calendar::new(user.id, "Work");
        let (user_id, calendar_id) = (user.id, calendar.id);

        let result: Result<(), TestError> = with_transaction(&store, move |uow| {
            Box::pin(async move {
                uow.create_user(&user).await?;
                uow.create_calendar(&calendar).await?;
                Err::<(), _>(TestError::Aborted)
            })
        })
        .await;
        assert_eq!(result, Err(TestError::Aborted));

        let uow = store.begin().await.unwrap();
        assert!(uow.get_user(user_id).await.unwrap().is_none());
        assert!(uow.get_calendar(calendar_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_repository_error_is_propagated_and_rolled_back() {
        let store = InMemoryStore::new();
        let user = User::new("Alice", "alice@example.com", "hash");
        let user_id = user.id;
        let orphan = Calendar::new(Uuid::new_v4(), "Orphan");

        let result: Result<(), TestError> = with_transaction(&store, move |uow| {
            Box::pin(async move {
                uow.create_user(&user).await?;
                uow.create_calendar(&orphan).await?;
                Ok::<_, TestError>(())
            })
        })
        .await;
        assert!(matches!(
            result,
            Err(TestError::Repository(RepositoryError::InvalidData(_)))
        ));

        let uow = store.begin().await.unwrap();
        assert!(uow.get_user(user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cancelled_work_rolls_back() {
        let store = InMemoryStore::new();
        let user = User::new("Alice", "alice@example.com", "hash");
        let user_id = user.id;

        let work = with_transaction::<(), TestError, _>(&store, move |uow| {
            Box::pin(async move {
                uow.create_user(&user).await?;
                std::future::pending::<()>().await;
                Ok::<_, TestError>(())
            })
        });
        let timed_out = tokio::time::timeout(std::time::Duration::from_millis(20), work).await;
        assert!(timed_out.is_err());

        let uow = store.begin().await.unwrap();
        assert!(uow.get_user(user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_commit_failure_is_returned_and_nothing_persists() {
        let store = FailingCommitStore(InMemoryStore::new());
        let user = User::new("Alice", "alice@example.com", "hash");
        let user_id = user.id;

        let result: Result<Uuid, TestError> = with_transaction(&store, move |uow| {
            Box::pin(async move {
                uow.create_user(&user).await?;
                Ok::<_, TestError>(user.id)
            })
        })
        .await;
        assert_eq!(
            result,
            Err(TestError::Repository(RepositoryError::TransactionFailed(
                "disk full".to_string()
            )))
        );

        let uow = store.0.begin().await.unwrap();
        assert!(uow.get_user(user_id).await.unwrap().is_none());
    }
}
