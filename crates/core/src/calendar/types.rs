use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. Owns zero or more calendars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Hashed password credential. Never serialized into API responses.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a freshly generated ID.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Sets a specific ID for this user (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A named calendar owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    pub name: String,
    /// Public calendars are readable by anyone.
    pub public: bool,
    pub created_at: DateTime<Utc>,
}

impl Calendar {
    /// Creates a new private calendar owned by `user_id`.
    pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            public: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the public flag.
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Sets a specific ID for this calendar (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns true if `user_id` owns this calendar.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// An event inside a calendar. Inherits the calendar's visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub calendar_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new non-recurring event.
    pub fn new(
        calendar_id: Uuid,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            calendar_id,
            title: title.into(),
            description: None,
            start_time,
            end_time,
            is_recurring: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the description for this event.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the event as recurring.
    pub fn recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }

    /// Sets a specific ID for this event (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// Permission level carried by a sharing grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Read,
    Write,
    ReadWrite,
}

impl Permission {
    /// Returns the wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::ReadWrite => "read_write",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Permission::Read),
            "write" => Ok(Permission::Write),
            "read_write" => Ok(Permission::ReadWrite),
            other => Err(format!("unknown permission: {other}")),
        }
    }
}

/// A grant linking one calendar to one target user.
///
/// The sharing ID doubles as the sharing code: any caller presenting it
/// can claim the grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sharing {
    pub id: Uuid,
    pub calendar_id: Uuid,
    pub shared_with_id: Uuid,
    pub permissions: Permission,
    /// A public grant acts as a bearer capability.
    pub public: bool,
}

impl Sharing {
    /// Creates a new private grant.
    pub fn new(calendar_id: Uuid, shared_with_id: Uuid, permissions: Permission) -> Self {
        Self {
            id: Uuid::new_v4(),
            calendar_id,
            shared_with_id,
            permissions,
            public: false,
        }
    }

    /// Sets the public flag.
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Sets a specific ID for this sharing (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// The sharing code callers present to claim this grant.
    pub fn code(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_builder() {
        let owner = Uuid::new_v4();
        let calendar = Calendar::new(owner, "Work").with_public(true);

        assert_eq!(calendar.name, "Work");
        assert!(calendar.public);
        assert!(calendar.is_owned_by(owner));
        assert!(!calendar.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User::new("Alice", "alice@example.com", "$argon2id$secret");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["email"], "alice@example.com");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_permission_wire_format() {
        assert_eq!(
            serde_json::to_string(&Permission::ReadWrite).unwrap(),
            "\"read_write\""
        );
        let parsed: Permission = serde_json::from_str("\"write\"").unwrap();
        assert_eq!(parsed, Permission::Write);
        assert_eq!("read".parse::<Permission>(), Ok(Permission::Read));
        assert!("admin".parse::<Permission>().is_err());
    }

    #[test]
    fn test_sharing_code_is_id() {
        let sharing = Sharing::new(Uuid::new_v4(), Uuid::new_v4(), Permission::Read);
        assert_eq!(sharing.code(), sharing.id.to_string());
        assert!(!sharing.public);
    }
}
