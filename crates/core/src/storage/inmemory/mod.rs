//! In-memory storage backend.
//!
//! All tables live in HashMaps behind a single `Arc<RwLock<_>>`. A unit of
//! work holds the write half of that lock for its whole lifetime and mutates
//! a private copy of the tables, which replaces the shared copy on commit.
//! Data is not persisted and will be lost when the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use calshare_core::storage::{InMemoryStore, TransactionManager, UserRepository};
//! use calshare_core::calendar::User;
//!
//! let store = InMemoryStore::new();
//! let uow = store.begin().await?;
//! uow.create_user(&User::new("Alice", "alice@example.com", "hash")).await?;
//! uow.commit().await?;
//! ```

mod store;

pub use store::{InMemoryStore, InMemoryUnitOfWork};
