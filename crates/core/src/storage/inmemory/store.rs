use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock};
use uuid::Uuid;

use crate::calendar::{
    Calendar, Event, Sharing, UpdateCalendarRequest, UpdateEventRequest, UpdateSharingRequest,
    User, UserUpdate,
};
use crate::storage::{
    CalendarRepository, EventRepository, RepositoryError, Result, SharingRepository,
    TransactionManager, UnitOfWork, UserRepository,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    calendars: HashMap<Uuid, Calendar>,
    events: HashMap<Uuid, Event>,
    sharings: HashMap<Uuid, Sharing>,
}

/// In-memory storage backend for testing and development.
///
/// Units of work are serialized: [`begin`](TransactionManager::begin) waits
/// until no other unit of work is open.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionManager for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let committed = Arc::clone(&self.tables).write_owned().await;
        let staged = committed.clone();
        Ok(Box::new(InMemoryUnitOfWork {
            committed,
            staged: Mutex::new(staged),
        }))
    }
}

/// A unit of work over an [`InMemoryStore`].
///
/// Dropping it without committing discards the staged tables.
#[derive(Debug)]
pub struct InMemoryUnitOfWork {
    committed: OwnedRwLockWriteGuard<Tables>,
    staged: Mutex<Tables>,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        let Self {
            mut committed,
            staged,
        } = *self;
        *committed = staged.into_inner();
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUnitOfWork {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let tables = self.staged.lock().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.staged.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut tables = self.staged.lock().await;
        if tables.users.contains_key(&user.id) {
            return Err(RepositoryError::already_exists("User", user.id));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists("User", &user.email));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_user(&self, id: Uuid, update: &UserUpdate) -> Result<()> {
        let mut tables = self.staged.lock().await;
        if let Some(email) = &update.email {
            if tables.users.values().any(|u| u.id != id && &u.email == email) {
                return Err(RepositoryError::already_exists("User", email));
            }
        }
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("User", id))?;
        update.apply_to(user);
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        let mut tables = self.staged.lock().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepositoryError::not_found("User", id));
        }
        Ok(())
    }
}

#[async_trait]
impl CalendarRepository for InMemoryUnitOfWork {
    async fn get_calendar(&self, id: Uuid) -> Result<Option<Calendar>> {
        let tables = self.staged.lock().await;
        Ok(tables.calendars.get(&id).cloned())
    }

    async fn find_calendars_by_owner(&self, user_id: Uuid) -> Result<Vec<Calendar>> {
        let tables = self.staged.lock().await;
        let mut calendars: Vec<Calendar> = tables
            .calendars
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        calendars.sort_by_key(|c| (c.created_at, c.id));
        Ok(calendars)
    }

    async fn create_calendar(&self, calendar: &Calendar) -> Result<()> {
        let mut tables = self.staged.lock().await;
        if tables.calendars.contains_key(&calendar.id) {
            return Err(RepositoryError::already_exists("Calendar", calendar.id));
        }
        if !tables.users.contains_key(&calendar.user_id) {
            return Err(RepositoryError::InvalidData(format!(
                "calendar owner does not exist: {}",
                calendar.user_id
            )));
        }
        tables.calendars.insert(calendar.id, calendar.clone());
        Ok(())
    }

    async fn update_calendar(&self, id: Uuid, update: &UpdateCalendarRequest) -> Result<()> {
        let mut tables = self.staged.lock().await;
        let calendar = tables
            .calendars
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Calendar", id))?;
        update.apply_to(calendar);
        Ok(())
    }

    async fn delete_calendar(&self, id: Uuid) -> Result<()> {
        let mut tables = self.staged.lock().await;
        if tables.calendars.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Calendar", id));
        }
        Ok(())
    }
}

#[async_trait]
impl EventRepository for InMemoryUnitOfWork {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let tables = self.staged.lock().await;
        Ok(tables.events.get(&id).cloned())
    }

    async fn find_events_by_calendar(&self, calendar_id: Uuid) -> Result<Vec<Event>> {
        let tables = self.staged.lock().await;
        let mut events: Vec<Event> = tables
            .events
            .values()
            .filter(|e| e.calendar_id == calendar_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.start_time, e.id));
        Ok(events)
    }

    async fn create_event(&self, event: &Event) -> Result<()> {
        let mut tables = self.staged.lock().await;
        if tables.events.contains_key(&event.id) {
            return Err(RepositoryError::already_exists("Event", event.id));
        }
        if !tables.calendars.contains_key(&event.calendar_id) {
            return Err(RepositoryError::InvalidData(format!(
                "event calendar does not exist: {}",
                event.calendar_id
            )));
        }
        tables.events.insert(event.id, event.clone());
        Ok(())
    }

    async fn update_event(&self, id: Uuid, update: &UpdateEventRequest) -> Result<()> {
        let mut tables = self.staged.lock().await;
        let event = tables
            .events
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Event", id))?;
        update.apply_to(event);
        Ok(())
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        let mut tables = self.staged.lock().await;
        if tables.events.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Event", id));
        }
        Ok(())
    }
}

#[async_trait]
impl SharingRepository for InMemoryUnitOfWork {
    async fn get_sharing(&self, id: Uuid) -> Result<Option<Sharing>> {
        let tables = self.staged.lock().await;
        Ok(tables.sharings.get(&id).cloned())
    }

    async fn find_sharing(
        &self,
        calendar_id: Uuid,
        shared_with_id: Uuid,
    ) -> Result<Option<Sharing>> {
        let tables = self.staged.lock().await;
        Ok(tables
            .sharings
            .values()
            .find(|s| s.calendar_id == calendar_id && s.shared_with_id == shared_with_id)
            .cloned())
    }

    async fn find_sharings_by_calendar(&self, calendar_id: Uuid) -> Result<Vec<Sharing>> {
        let tables = self.staged.lock().await;
        let mut sharings: Vec<Sharing> = tables
            .sharings
            .values()
            .filter(|s| s.calendar_id == calendar_id)
            .cloned()
            .collect();
        sharings.sort_by_key(|s| s.id);
        Ok(sharings)
    }

    async fn find_sharings_shared_with(&self, user_id: Uuid) -> Result<Vec<Sharing>> {
        let tables = self.staged.lock().await;
        let mut sharings: Vec<Sharing> = tables
            .sharings
            .values()
            .filter(|s| s.shared_with_id == user_id)
            .cloned()
            .collect();
        sharings.sort_by_key(|s| s.id);
        Ok(sharings)
    }

    async fn create_sharing(&self, sharing: &Sharing) -> Result<()> {
        let mut tables = self.staged.lock().await;
        if tables.sharings.contains_key(&sharing.id) {
            return Err(RepositoryError::already_exists("Sharing", sharing.id));
        }
        if tables.sharings.values().any(|s| {
            s.calendar_id == sharing.calendar_id && s.shared_with_id == sharing.shared_with_id
        }) {
            return Err(RepositoryError::already_exists(
                "Sharing",
                format!("{}/{}", sharing.calendar_id, sharing.shared_with_id),
            ));
        }
        if !tables.calendars.contains_key(&sharing.calendar_id) {
            return Err(RepositoryError::InvalidData(format!(
                "shared calendar does not exist: {}",
                sharing.calendar_id
            )));
        }
        if !tables.users.contains_key(&sharing.shared_with_id) {
            return Err(RepositoryError::InvalidData(format!(
                "sharing target does not exist: {}",
                sharing.shared_with_id
            )));
        }
        tables.sharings.insert(sharing.id, sharing.clone());
        Ok(())
    }

    async fn update_sharing(&self, id: Uuid, update: &UpdateSharingRequest) -> Result<()> {
        let mut tables = self.staged.lock().await;
        let sharing = tables
            .sharings
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Sharing", id))?;
        update.apply_to(sharing);
        Ok(())
    }

    async fn delete_sharing(&self, id: Uuid) -> Result<()> {
        let mut tables = self.staged.lock().await;
        if tables.sharings.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Sharing", id));
        }
        Ok(())
    }
}
