//! SQLite store implementation.
//!
//! Implements the repository traits from `calshare_core::storage` on top of
//! a `sqlx` connection pool. Every unit of work owns one pool transaction.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteQueryResult};
use sqlx::{Sqlite, Transaction};
use tokio::sync::Mutex;
use uuid::Uuid;

use calshare_core::calendar::{
    Calendar, Event, Sharing, UpdateCalendarRequest, UpdateEventRequest, UpdateSharingRequest,
    User, UserUpdate,
};
use calshare_core::storage::{
    CalendarRepository, EventRepository, RepositoryError, Result, SharingRepository,
    TransactionManager, UnitOfWork, UserRepository,
};

use super::conversions::{
    format_datetime, row_to_calendar, row_to_event, row_to_sharing, row_to_user, CalendarRow,
    EventRow, SharingRow, UserRow,
};
use super::error::{map_sqlx_error, map_transaction_error};
use super::schema;

/// SQLite-backed store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) a file-based database and its schema.
    ///
    /// The pool holds a single connection, so units of work queue for it
    /// instead of failing with `SQLITE_BUSY` when two writers overlap.
    pub async fn new(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::with_pool(pool).await
    }

    /// Creates a store over a private in-memory database.
    ///
    /// The pool holds a single connection, so units of work run one at a
    /// time. Data is lost when the store is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(schema::CREATE_TABLES)
            .execute(&pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TransactionManager for SqliteStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_transaction_error)?;
        Ok(Box::new(SqliteUnitOfWork { tx: Mutex::new(tx) }))
    }
}

/// A unit of work over a [`SqliteStore`].
///
/// Dropping it without committing rolls the transaction back.
pub struct SqliteUnitOfWork {
    tx: Mutex<Transaction<'static, Sqlite>>,
}

impl SqliteUnitOfWork {
    async fn fetch_optional<R>(&self, query: &'static str, id: Uuid) -> sqlx::Result<Option<R>>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
    {
        let mut tx = self.tx.lock().await;
        sqlx::query_as::<_, R>(query)
            .bind(id.to_string())
            .fetch_optional(&mut **tx)
            .await
    }

    async fn fetch_all<R>(&self, query: &'static str, key: String) -> sqlx::Result<Vec<R>>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
    {
        let mut tx = self.tx.lock().await;
        sqlx::query_as::<_, R>(query)
            .bind(key)
            .fetch_all(&mut **tx)
            .await
    }

    async fn delete_by_id(
        &self,
        query: &'static str,
        entity_type: &'static str,
        id: Uuid,
    ) -> Result<()> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, entity_type, &id.to_string()))?;

        ensure_affected(result, entity_type, id)
    }
}

fn ensure_affected(result: SqliteQueryResult, entity_type: &'static str, id: Uuid) -> Result<()> {
    if result.rows_affected() == 0 {
        return Err(RepositoryError::not_found(entity_type, id));
    }
    Ok(())
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx
            .into_inner()
            .commit()
            .await
            .map_err(map_transaction_error)
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx
            .into_inner()
            .rollback()
            .await
            .map_err(map_transaction_error)
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteUnitOfWork {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.fetch_optional::<UserRow>(schema::SELECT_USER_BY_ID, id)
            .await
            .map_err(|e| map_sqlx_error(e, "User", &id.to_string()))?
            .map(row_to_user)
            .transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut tx = self.tx.lock().await;
        sqlx::query_as::<_, UserRow>(schema::SELECT_USER_BY_EMAIL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "User", email))?
            .map(row_to_user)
            .transpose()
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut tx = self.tx.lock().await;
        sqlx::query(schema::INSERT_USER)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(format_datetime(&user.created_at))
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "User", &user.email))?;
        Ok(())
    }

    async fn update_user(&self, id: Uuid, update: &UserUpdate) -> Result<()> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query(schema::UPDATE_USER)
            .bind(id.to_string())
            .bind(update.name.as_deref())
            .bind(update.email.as_deref())
            .bind(update.password_hash.as_deref())
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                let key = update.email.clone().unwrap_or_else(|| id.to_string());
                map_sqlx_error(e, "User", &key)
            })?;

        ensure_affected(result, "User", id)
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_USER, "User", id).await
    }
}

// ============================================================================
// CalendarRepository implementation
// ============================================================================

#[async_trait]
impl CalendarRepository for SqliteUnitOfWork {
    async fn get_calendar(&self, id: Uuid) -> Result<Option<Calendar>> {
        self.fetch_optional::<CalendarRow>(schema::SELECT_CALENDAR_BY_ID, id)
            .await
            .map_err(|e| map_sqlx_error(e, "Calendar", &id.to_string()))?
            .map(row_to_calendar)
            .transpose()
    }

    async fn find_calendars_by_owner(&self, user_id: Uuid) -> Result<Vec<Calendar>> {
        self.fetch_all::<CalendarRow>(schema::SELECT_CALENDARS_BY_OWNER, user_id.to_string())
            .await
            .map_err(|e| map_sqlx_error(e, "Calendar", &user_id.to_string()))?
            .into_iter()
            .map(row_to_calendar)
            .collect()
    }

    async fn create_calendar(&self, calendar: &Calendar) -> Result<()> {
        let mut tx = self.tx.lock().await;
        sqlx::query(schema::INSERT_CALENDAR)
            .bind(calendar.id.to_string())
            .bind(calendar.user_id.to_string())
            .bind(&calendar.name)
            .bind(calendar.public)
            .bind(format_datetime(&calendar.created_at))
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Calendar", &calendar.id.to_string()))?;
        Ok(())
    }

    async fn update_calendar(&self, id: Uuid, update: &UpdateCalendarRequest) -> Result<()> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query(schema::UPDATE_CALENDAR)
            .bind(id.to_string())
            .bind(update.name.as_deref())
            .bind(update.public)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Calendar", &id.to_string()))?;

        ensure_affected(result, "Calendar", id)
    }

    async fn delete_calendar(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_CALENDAR, "Calendar", id)
            .await
    }
}

// ============================================================================
// EventRepository implementation
// ============================================================================

#[async_trait]
impl EventRepository for SqliteUnitOfWork {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        self.fetch_optional::<EventRow>(schema::SELECT_EVENT_BY_ID, id)
            .await
            .map_err(|e| map_sqlx_error(e, "Event", &id.to_string()))?
            .map(row_to_event)
            .transpose()
    }

    async fn find_events_by_calendar(&self, calendar_id: Uuid) -> Result<Vec<Event>> {
        self.fetch_all::<EventRow>(schema::SELECT_EVENTS_BY_CALENDAR, calendar_id.to_string())
            .await
            .map_err(|e| map_sqlx_error(e, "Event", &calendar_id.to_string()))?
            .into_iter()
            .map(row_to_event)
            .collect()
    }

    async fn create_event(&self, event: &Event) -> Result<()> {
        let mut tx = self.tx.lock().await;
        sqlx::query(schema::INSERT_EVENT)
            .bind(event.id.to_string())
            .bind(event.calendar_id.to_string())
            .bind(&event.title)
            .bind(event.description.as_deref())
            .bind(format_datetime(&event.start_time))
            .bind(format_datetime(&event.end_time))
            .bind(event.is_recurring)
            .bind(format_datetime(&event.created_at))
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Event", &event.id.to_string()))?;
        Ok(())
    }

    async fn update_event(&self, id: Uuid, update: &UpdateEventRequest) -> Result<()> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query(schema::UPDATE_EVENT)
            .bind(id.to_string())
            .bind(update.title.as_deref())
            .bind(update.description.as_deref())
            .bind(update.start_time.as_ref().map(format_datetime))
            .bind(update.end_time.as_ref().map(format_datetime))
            .bind(update.is_recurring)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Event", &id.to_string()))?;

        ensure_affected(result, "Event", id)
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_EVENT, "Event", id).await
    }
}

// ============================================================================
// SharingRepository implementation
// ============================================================================

#[async_trait]
impl SharingRepository for SqliteUnitOfWork {
    async fn get_sharing(&self, id: Uuid) -> Result<Option<Sharing>> {
        self.fetch_optional::<SharingRow>(schema::SELECT_SHARING_BY_ID, id)
            .await
            .map_err(|e| map_sqlx_error(e, "Sharing", &id.to_string()))?
            .map(row_to_sharing)
            .transpose()
    }

    async fn find_sharing(
        &self,
        calendar_id: Uuid,
        shared_with_id: Uuid,
    ) -> Result<Option<Sharing>> {
        let mut tx = self.tx.lock().await;
        sqlx::query_as::<_, SharingRow>(schema::SELECT_SHARING_BY_PAIR)
            .bind(calendar_id.to_string())
            .bind(shared_with_id.to_string())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Sharing", &calendar_id.to_string()))?
            .map(row_to_sharing)
            .transpose()
    }

    async fn find_sharings_by_calendar(&self, calendar_id: Uuid) -> Result<Vec<Sharing>> {
        self.fetch_all::<SharingRow>(schema::SELECT_SHARINGS_BY_CALENDAR, calendar_id.to_string())
            .await
            .map_err(|e| map_sqlx_error(e, "Sharing", &calendar_id.to_string()))?
            .into_iter()
            .map(row_to_sharing)
            .collect()
    }

    async fn find_sharings_shared_with(&self, user_id: Uuid) -> Result<Vec<Sharing>> {
        self.fetch_all::<SharingRow>(schema::SELECT_SHARINGS_SHARED_WITH, user_id.to_string())
            .await
            .map_err(|e| map_sqlx_error(e, "Sharing", &user_id.to_string()))?
            .into_iter()
            .map(row_to_sharing)
            .collect()
    }

    async fn create_sharing(&self, sharing: &Sharing) -> Result<()> {
        let mut tx = self.tx.lock().await;
        sqlx::query(schema::INSERT_SHARING)
            .bind(sharing.id.to_string())
            .bind(sharing.calendar_id.to_string())
            .bind(sharing.shared_with_id.to_string())
            .bind(sharing.permissions.as_str())
            .bind(sharing.public)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Sharing", &sharing.id.to_string()))?;
        Ok(())
    }

    async fn update_sharing(&self, id: Uuid, update: &UpdateSharingRequest) -> Result<()> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query(schema::UPDATE_SHARING)
            .bind(id.to_string())
            .bind(update.permissions.map(|p| p.as_str()))
            .bind(update.public)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Sharing", &id.to_string()))?;

        ensure_affected(result, "Sharing", id)
    }

    async fn delete_sharing(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_SHARING, "Sharing", id)
            .await
    }
}
