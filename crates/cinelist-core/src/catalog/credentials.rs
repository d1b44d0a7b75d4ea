//! Catalog API key handling
//!
//! A successful login stores the account password in the override slot and
//! the catalog client uses it as its API key. This coupling is kept behind
//! `ApiKeyOverride` so it can be switched off without touching the
//! account store.

use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::settings::CatalogSettings;
use crate::storage::{KeyValueStore, API_KEY_OVERRIDE_KEY};

/// Where the catalog API key for the next request comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Written by the last login
    Override,
    /// Configured default
    Default,
    /// Nothing configured
    Missing,
}

/// Writer side of the catalog API key override
pub trait ApiKeyOverride: Send + Sync {
    /// Make `secret` the catalog API key
    fn apply(&self, secret: &str) -> Result<()>;

    /// Drop the override so the default key is used again
    fn revoke(&self) -> Result<()>;
}

/// Stores the override in the shared key-value slot
pub struct StorageApiKeyOverride {
    storage: Arc<dyn KeyValueStore>,
}

impl StorageApiKeyOverride {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }
}

impl ApiKeyOverride for StorageApiKeyOverride {
    fn apply(&self, secret: &str) -> Result<()> {
        self.storage.set(API_KEY_OVERRIDE_KEY, secret)?;
        debug!("Applied catalog API key override");
        Ok(())
    }

    fn revoke(&self) -> Result<()> {
        self.storage.remove(API_KEY_OVERRIDE_KEY)?;
        debug!("Revoked catalog API key override");
        Ok(())
    }
}

/// Never touches the override slot
#[derive(Debug, Default)]
pub struct DisabledApiKeyOverride;

impl ApiKeyOverride for DisabledApiKeyOverride {
    fn apply(&self, _secret: &str) -> Result<()> {
        Ok(())
    }

    fn revoke(&self) -> Result<()> {
        Ok(())
    }
}

/// Reader side: resolves the catalog API key on every call
pub struct CatalogCredentials {
    storage: Arc<dyn KeyValueStore>,
    default_key: Option<String>,
    base_url: String,
    language: String,
}

impl CatalogCredentials {
    pub fn new(storage: Arc<dyn KeyValueStore>, settings: &CatalogSettings) -> Self {
        Self {
            storage,
            default_key: settings.api_key.clone().filter(|k| !k.is_empty()),
            base_url: settings.base_url.clone(),
            language: settings.language.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn override_key(&self) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(API_KEY_OVERRIDE_KEY)?
            .filter(|k| !k.is_empty()))
    }

    /// Current API key: the override if present, else the default
    pub fn resolve(&self) -> Result<Option<String>> {
        match self.override_key()? {
            Some(key) => Ok(Some(key)),
            None => Ok(self.default_key.clone()),
        }
    }

    pub fn source(&self) -> Result<ApiKeySource> {
        if self.override_key()?.is_some() {
            Ok(ApiKeySource::Override)
        } else if self.default_key.is_some() {
            Ok(ApiKeySource::Default)
        } else {
            Ok(ApiKeySource::Missing)
        }
    }
}
