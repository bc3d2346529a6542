//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use calshare_core::calendar::{Calendar, Event, Permission, Sharing, User};
use calshare_core::storage::{RepositoryError, Result};

/// Columns: id, name, email, password_hash, created_at
pub type UserRow = (String, String, String, String, String);

/// Columns: id, user_id, name, public, created_at
pub type CalendarRow = (String, String, String, bool, String);

/// Columns: id, calendar_id, title, description, start_time, end_time, is_recurring, created_at
pub type EventRow = (
    String,
    String,
    String,
    Option<String>,
    String,
    String,
    bool,
    String,
);

/// Columns: id, calendar_id, shared_with_id, permissions, public
pub type SharingRow = (String, String, String, String, bool);

pub fn row_to_user(row: UserRow) -> Result<User> {
    let (id, name, email, password_hash, created_at) = row;
    Ok(User {
        id: parse_uuid(&id)?,
        name,
        email,
        password_hash,
        created_at: parse_datetime(&created_at)?,
    })
}

pub fn row_to_calendar(row: CalendarRow) -> Result<Calendar> {
    let (id, user_id, name, public, created_at) = row;
    Ok(Calendar {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        name,
        public,
        created_at: parse_datetime(&created_at)?,
    })
}

pub fn row_to_event(row: EventRow) -> Result<Event> {
    let (id, calendar_id, title, description, start_time, end_time, is_recurring, created_at) =
        row;
    Ok(Event {
        id: parse_uuid(&id)?,
        calendar_id: parse_uuid(&calendar_id)?,
        title,
        description,
        start_time: parse_datetime(&start_time)?,
        end_time: parse_datetime(&end_time)?,
        is_recurring,
        created_at: parse_datetime(&created_at)?,
    })
}

pub fn row_to_sharing(row: SharingRow) -> Result<Sharing> {
    let (id, calendar_id, shared_with_id, permissions, public) = row;
    Ok(Sharing {
        id: parse_uuid(&id)?,
        calendar_id: parse_uuid(&calendar_id)?,
        shared_with_id: parse_uuid(&shared_with_id)?,
        permissions: permissions
            .parse::<Permission>()
            .map_err(RepositoryError::Serialization)?,
        public,
    })
}

/// Formats a timestamp with a fixed number of fractional digits so that
/// stored values sort chronologically as text.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s)
        .map_err(|e| RepositoryError::Serialization(format!("invalid UUID '{s}': {e}")))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Serialization(format!("invalid datetime '{s}': {e}")))
}
