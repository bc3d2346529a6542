//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite store,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Calendars table
CREATE TABLE IF NOT EXISTS calendars (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    public INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Events table
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY,
    calendar_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    is_recurring INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    FOREIGN KEY (calendar_id) REFERENCES calendars(id) ON DELETE CASCADE
);

-- Sharings table
CREATE TABLE IF NOT EXISTS sharings (
    id TEXT PRIMARY KEY,
    calendar_id TEXT NOT NULL,
    shared_with_id TEXT NOT NULL,
    permissions TEXT NOT NULL,
    public INTEGER NOT NULL DEFAULT 0,
    UNIQUE (calendar_id, shared_with_id),
    FOREIGN KEY (calendar_id) REFERENCES calendars(id) ON DELETE CASCADE,
    FOREIGN KEY (shared_with_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_calendars_user_id ON calendars(user_id);
CREATE INDEX IF NOT EXISTS idx_events_calendar_id ON events(calendar_id);
CREATE INDEX IF NOT EXISTS idx_sharings_shared_with_id ON sharings(shared_with_id);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (id, name, email, password_hash, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, name, email, password_hash, created_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, name, email, password_hash, created_at
FROM users
WHERE email = ?1
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET name = COALESCE(?2, name),
    email = COALESCE(?3, email),
    password_hash = COALESCE(?4, password_hash)
WHERE id = ?1
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?1
"#;

// Calendar queries
pub const INSERT_CALENDAR: &str = r#"
INSERT INTO calendars (id, user_id, name, public, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_CALENDAR_BY_ID: &str = r#"
SELECT id, user_id, name, public, created_at
FROM calendars
WHERE id = ?1
"#;

pub const SELECT_CALENDARS_BY_OWNER: &str = r#"
SELECT id, user_id, name, public, created_at
FROM calendars
WHERE user_id = ?1
ORDER BY created_at ASC, id ASC
"#;

pub const UPDATE_CALENDAR: &str = r#"
UPDATE calendars
SET name = COALESCE(?2, name),
    public = COALESCE(?3, public)
WHERE id = ?1
"#;

pub const DELETE_CALENDAR: &str = r#"
DELETE FROM calendars
WHERE id = ?1
"#;

// Event queries
pub const INSERT_EVENT: &str = r#"
INSERT INTO events (id, calendar_id, title, description, start_time, end_time, is_recurring, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SELECT_EVENT_BY_ID: &str = r#"
SELECT id, calendar_id, title, description, start_time, end_time, is_recurring, created_at
FROM events
WHERE id = ?1
"#;

pub const SELECT_EVENTS_BY_CALENDAR: &str = r#"
SELECT id, calendar_id, title, description, start_time, end_time, is_recurring, created_at
FROM events
WHERE calendar_id = ?1
ORDER BY start_time ASC, id ASC
"#;

pub const UPDATE_EVENT: &str = r#"
UPDATE events
SET title = COALESCE(?2, title),
    description = COALESCE(?3, description),
    start_time = COALESCE(?4, start_time),
    end_time = COALESCE(?5, end_time),
    is_recurring = COALESCE(?6, is_recurring)
WHERE id = ?1
"#;

pub const DELETE_EVENT: &str = r#"
DELETE FROM events
WHERE id = ?1
"#;

// Sharing queries
pub const INSERT_SHARING: &str = r#"
INSERT INTO sharings (id, calendar_id, shared_with_id, permissions, public)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_SHARING_BY_ID: &str = r#"
SELECT id, calendar_id, shared_with_id, permissions, public
FROM sharings
WHERE id = ?1
"#;

pub const SELECT_SHARING_BY_PAIR: &str = r#"
SELECT id, calendar_id, shared_with_id, permissions, public
FROM sharings
WHERE calendar_id = ?1 AND shared_with_id = ?2
"#;

pub const SELECT_SHARINGS_BY_CALENDAR: &str = r#"
SELECT id, calendar_id, shared_with_id, permissions, public
FROM sharings
WHERE calendar_id = ?1
ORDER BY id ASC
"#;

pub const SELECT_SHARINGS_SHARED_WITH: &str = r#"
SELECT id, calendar_id, shared_with_id, permissions, public
FROM sharings
WHERE shared_with_id = ?1
ORDER BY id ASC
"#;

pub const UPDATE_SHARING: &str = r#"
UPDATE sharings
SET permissions = COALESCE(?2, permissions),
    public = COALESCE(?3, public)
WHERE id = ?1
"#;

pub const DELETE_SHARING: &str = r#"
DELETE FROM sharings
WHERE id = ?1
"#;
