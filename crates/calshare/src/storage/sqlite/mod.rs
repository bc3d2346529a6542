//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of the repository traits
//! using `sqlx`. Foreign keys are enforced and children cascade with their
//! parents at the schema level as well as in the deletion services.

mod conversions;
mod error;
mod schema;
mod store;

pub use store::SqliteStore;
