use async_trait::async_trait;
use uuid::Uuid;

use crate::calendar::{
    Calendar, Event, Sharing, UpdateCalendarRequest, UpdateEventRequest, UpdateSharingRequest,
    User, UserUpdate,
};

use super::Result;

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their email address.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a new user.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Applies a partial update to an existing user.
    async fn update_user(&self, id: Uuid, update: &UserUpdate) -> Result<()>;

    /// Deletes a user by their ID.
    async fn delete_user(&self, id: Uuid) -> Result<()>;
}

/// Repository for calendar operations.
#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// Gets a calendar by its ID.
    async fn get_calendar(&self, id: Uuid) -> Result<Option<Calendar>>;

    /// Gets all calendars owned by a user.
    async fn find_calendars_by_owner(&self, user_id: Uuid) -> Result<Vec<Calendar>>;

    /// Creates a new calendar.
    async fn create_calendar(&self, calendar: &Calendar) -> Result<()>;

    /// Applies a partial update to an existing calendar.
    async fn update_calendar(&self, id: Uuid, update: &UpdateCalendarRequest) -> Result<()>;

    /// Deletes a calendar by its ID.
    async fn delete_calendar(&self, id: Uuid) -> Result<()>;
}

/// Repository for event operations.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Gets an event by its ID.
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;

    /// Gets all events of a calendar, ordered by start time.
    async fn find_events_by_calendar(&self, calendar_id: Uuid) -> Result<Vec<Event>>;

    /// Creates a new event.
    async fn create_event(&self, event: &Event) -> Result<()>;

    /// Applies a partial update to an existing event.
    async fn update_event(&self, id: Uuid, update: &UpdateEventRequest) -> Result<()>;

    /// Deletes an event by its ID.
    async fn delete_event(&self, id: Uuid) -> Result<()>;
}

/// Repository for sharing grants.
#[async_trait]
pub trait SharingRepository: Send + Sync {
    /// Gets a sharing by its ID (the sharing code).
    async fn get_sharing(&self, id: Uuid) -> Result<Option<Sharing>>;

    /// Gets the sharing for a (calendar, target user) pair.
    async fn find_sharing(&self, calendar_id: Uuid, shared_with_id: Uuid)
        -> Result<Option<Sharing>>;

    /// Gets all sharings of a calendar.
    async fn find_sharings_by_calendar(&self, calendar_id: Uuid) -> Result<Vec<Sharing>>;

    /// Gets all sharings granted to a user.
    async fn find_sharings_shared_with(&self, user_id: Uuid) -> Result<Vec<Sharing>>;

    /// Creates a new sharing.
    async fn create_sharing(&self, sharing: &Sharing) -> Result<()>;

    /// Applies a partial update to an existing sharing.
    async fn update_sharing(&self, id: Uuid, update: &UpdateSharingRequest) -> Result<()>;

    /// Deletes a sharing by its ID.
    async fn delete_sharing(&self, id: Uuid) -> Result<()>;
}

/// Every repository the services need, behind one bound.
pub trait Store: UserRepository + CalendarRepository + EventRepository + SharingRepository {}

impl<T> Store for T where
    T: UserRepository + CalendarRepository + EventRepository + SharingRepository + ?Sized
{
}

/// A unit of work: repository access bound to one transaction.
///
/// Mutations are staged until [`commit`](UnitOfWork::commit). Dropping a
/// unit of work without committing rolls it back, so a cancelled request
/// never leaves a partial commit behind. Implementations must roll back
/// and release the underlying connection when `commit` itself fails.
#[async_trait]
pub trait UnitOfWork:
    UserRepository + CalendarRepository + EventRepository + SharingRepository
{
    /// Atomically applies every staged mutation.
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Discards every staged mutation.
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Hands out units of work. Application state holds one of these.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Begins a new unit of work with its own exclusive connection/session.
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>>;
}
