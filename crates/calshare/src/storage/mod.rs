//! Storage backends available to the server.
//!
//! The in-memory backend lives in `calshare_core`; the SQLite backend is
//! compiled in with the `sqlite` feature.

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
