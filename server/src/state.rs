//! Shared application state.

use std::sync::Arc;

use jeton_vault::{SeedStore, VaultError};

use crate::config::ServerConfig;

/// State shared by all request handlers.
///
/// Holds no open file handles or cached key material. The private key
/// and seed are read from disk per request, so rotating either on disk
/// takes effect without a restart.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Immutable server configuration.
    pub config: ServerConfig,
    /// Seed persistence rooted at the configured data directory.
    pub store: SeedStore,
}

impl AppState {
    /// Build state from configuration, creating the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] when the data directory cannot be
    /// created.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, VaultError> {
        let store = SeedStore::open(config.data_dir.clone())?;
        Ok(Arc::new(Self { config, store }))
    }
}
