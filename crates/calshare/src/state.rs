//! Application state.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage is reached through a transaction manager so
//! every handler works inside one unit of work; the backend is chosen via
//! feature flags.

use std::sync::Arc;

use calshare_auth::{AuthConfig, AuthState};
#[cfg(any(test, feature = "inmemory"))]
use calshare_core::storage::InMemoryStore;
use calshare_core::storage::TransactionManager;

use crate::config::Config;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Opens units of work against the configured backend.
    pub store: Arc<dyn TransactionManager>,
    /// Token configuration for the auth extractors and login.
    pub auth: AuthState,
}

impl AppState {
    pub fn new(store: Arc<dyn TransactionManager>, auth: AuthState) -> Self {
        Self { store, auth }
    }

    /// Creates state backed by an empty in-memory store.
    #[cfg(any(test, feature = "inmemory"))]
    pub fn in_memory(auth: AuthConfig) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), AuthState::new(auth))
    }

    /// Creates state for the compiled-in storage backend.
    #[cfg(feature = "inmemory")]
    pub async fn from_config(_config: &Config, auth: AuthConfig) -> anyhow::Result<Self> {
        tracing::info!("Using in-memory storage");
        Ok(Self::in_memory(auth))
    }

    /// Creates state for the compiled-in storage backend.
    #[cfg(feature = "sqlite")]
    pub async fn from_config(config: &Config, auth: AuthConfig) -> anyhow::Result<Self> {
        tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
        let store = crate::storage::SqliteStore::new(&config.sqlite_path).await?;
        Ok(Self::new(Arc::new(store), AuthState::new(auth)))
    }
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}
