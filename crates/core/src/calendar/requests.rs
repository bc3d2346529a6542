//! Request and partial-update types for calendar operations.
//!
//! Update types carry `Option` fields: `None` leaves the stored value
//! untouched, `Some` replaces it. Following the Functional Core pattern,
//! these are pure data types with no I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Calendar, Event, Permission, Sharing, User};

/// Data for registering a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn into_user(self) -> User {
        User::new(self.name, self.email, self.password_hash)
    }
}

/// Partial update of a user. The password is already hashed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserUpdate {
    /// Apply updates to an existing user.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password_hash) = &self.password_hash {
            user.password_hash = password_hash.clone();
        }
    }

    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

/// Request payload for creating a new calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCalendarRequest {
    pub name: String,
    #[serde(default)]
    pub public: bool,
}

impl CreateCalendarRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public: false,
        }
    }

    /// Convert into a Calendar owned by `owner_id`.
    pub fn into_calendar(self, owner_id: Uuid) -> Calendar {
        Calendar::new(owner_id, self.name).with_public(self.public)
    }
}

/// Request payload for updating a calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCalendarRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

impl UpdateCalendarRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    /// Apply updates to an existing calendar.
    pub fn apply_to(&self, calendar: &mut Calendar) {
        if let Some(name) = &self.name {
            calendar.name = name.clone();
        }
        if let Some(public) = self.public {
            calendar.public = public;
        }
    }
}

/// Request payload for creating a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub calendar_id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl CreateEventRequest {
    pub fn new(
        calendar_id: Uuid,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            calendar_id,
            title: title.into(),
            description: None,
            start_time,
            end_time,
            is_recurring: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Convert into an Event.
    pub fn into_event(self) -> Event {
        let mut event = Event::new(self.calendar_id, self.title, self.start_time, self.end_time)
            .recurring(self.is_recurring);
        event.description = self.description;
        event
    }
}

/// Request payload for updating an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

impl UpdateEventRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Apply updates to an existing event.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = end_time;
        }
        if let Some(is_recurring) = self.is_recurring {
            event.is_recurring = is_recurring;
        }
    }
}

/// Request payload for sharing a calendar with a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSharingRequest {
    pub calendar_id: Uuid,
    pub shared_with_id: Uuid,
    pub permissions: Permission,
    #[serde(default)]
    pub public: bool,
}

impl CreateSharingRequest {
    pub fn new(calendar_id: Uuid, shared_with_id: Uuid, permissions: Permission) -> Self {
        Self {
            calendar_id,
            shared_with_id,
            permissions,
            public: false,
        }
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Convert into a Sharing.
    pub fn into_sharing(self) -> Sharing {
        Sharing::new(self.calendar_id, self.shared_with_id, self.permissions)
            .with_public(self.public)
    }
}

/// Request payload for updating a sharing grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSharingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

impl UpdateSharingRequest {
    /// Apply updates to an existing sharing.
    pub fn apply_to(&self, sharing: &mut Sharing) {
        if let Some(permissions) = self.permissions {
            sharing.permissions = permissions;
        }
        if let Some(public) = self.public {
            sharing.public = public;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_update_calendar_only_touches_given_fields() {
        let mut calendar = Calendar::new(Uuid::new_v4(), "Work").with_public(true);

        UpdateCalendarRequest::new()
            .with_name("Personal")
            .apply_to(&mut calendar);

        assert_eq!(calendar.name, "Personal");
        assert!(calendar.public);
    }

    #[test]
    fn test_update_event_only_touches_given_fields() {
        let start = Utc.with_ymd_and_hms(2024, 9, 30, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 9, 30, 10, 0, 0).unwrap();
        let mut event = Event::new(Uuid::new_v4(), "Standup", start, end).with_description("daily");

        UpdateEventRequest::new()
            .with_title("Retro")
            .apply_to(&mut event);

        assert_eq!(event.title, "Retro");
        assert_eq!(event.description.as_deref(), Some("daily"));
        assert_eq!(event.start_time, start);
        assert_eq!(event.end_time, end);
    }

    #[test]
    fn test_update_event_request_deserializes_missing_fields_as_none() {
        let update: UpdateEventRequest =
            serde_json::from_str(r#"{"is_recurring": true}"#).unwrap();

        assert_eq!(update.is_recurring, Some(true));
        assert!(update.title.is_none());
        assert!(update.start_time.is_none());
    }

    #[test]
    fn test_update_sharing_request() {
        let mut sharing = Sharing::new(Uuid::new_v4(), Uuid::new_v4(), Permission::Read);
        let update = UpdateSharingRequest {
            permissions: Some(Permission::ReadWrite),
            public: None,
        };

        update.apply_to(&mut sharing);

        assert_eq!(sharing.permissions, Permission::ReadWrite);
        assert!(!sharing.public);
    }

    #[test]
    fn test_user_update_is_empty() {
        assert!(UserUpdate::default().is_empty());
        let update = UserUpdate {
            name: Some("Bob".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_create_sharing_request_from_json() {
        let calendar_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let json = format!(
            r#"{{"calendar_id":"{calendar_id}","shared_with_id":"{user_id}","permissions":"read_write"}}"#
        );

        let request: CreateSharingRequest = serde_json::from_str(&json).unwrap();
        let sharing = request.into_sharing();

        assert_eq!(sharing.calendar_id, calendar_id);
        assert_eq!(sharing.shared_with_id, user_id);
        assert_eq!(sharing.permissions, Permission::ReadWrite);
        assert!(!sharing.public);
    }
}
