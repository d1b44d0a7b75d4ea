//! Application wiring
//!
//! Builds one storage backend and hands it to both stores, the API key
//! override and the catalog credential reader.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::account::AccountStore;
use crate::catalog::{
    ApiKeyOverride, CatalogCredentials, DisabledApiKeyOverride, StorageApiKeyOverride,
};
use crate::error::Result;
use crate::settings::{Settings, SettingsManager};
use crate::storage::{FileStorage, KeyValueStore};
use crate::wishlist::WishlistStore;

/// Fully initialized client state
pub struct Cinelist {
    storage: Arc<dyn KeyValueStore>,
    settings: Settings,
    /// Accounts and login session
    pub accounts: AccountStore,
    /// Saved movies
    pub wishlist: WishlistStore,
    /// Catalog API key resolution
    pub catalog: CatalogCredentials,
    data_dir: Option<PathBuf>,
}

impl Cinelist {
    /// Open file-backed state in `data_dir`, reading `settings.json` from there
    pub fn open(data_dir: &Path) -> Result<Self> {
        let settings = SettingsManager::new(data_dir).get().clone();
        Self::open_with_settings(data_dir, settings)
    }

    /// Open file-backed state in `data_dir` with explicit settings
    pub fn open_with_settings(data_dir: &Path, settings: Settings) -> Result<Self> {
        let storage = Arc::new(FileStorage::with_dir(data_dir.to_path_buf())?);

        let mut app = Self::with_storage(storage, settings)?;
        app.data_dir = Some(data_dir.to_path_buf());

        info!("Opened cinelist state at {:?}", data_dir);
        Ok(app)
    }

    /// Build on an arbitrary backend (tests, in-memory use)
    pub fn with_storage(storage: Arc<dyn KeyValueStore>, settings: Settings) -> Result<Self> {
        let api_key: Arc<dyn ApiKeyOverride> = if settings.api_key_override {
            Arc::new(StorageApiKeyOverride::new(storage.clone()))
        } else {
            Arc::new(DisabledApiKeyOverride)
        };

        let accounts = AccountStore::init(storage.clone(), api_key)?;
        let wishlist = WishlistStore::init(storage.clone())?;
        let catalog = CatalogCredentials::new(storage.clone(), &settings.catalog);

        Ok(Self {
            storage,
            settings,
            accounts,
            wishlist,
            catalog,
            data_dir: None,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a session is persisted in the backing storage
    pub fn is_authenticated(&self) -> bool {
        AccountStore::is_authenticated(self.storage.as_ref())
    }

    pub fn storage_backend(&self) -> &'static str {
        self.storage.backend_name()
    }

    /// Data directory, for file-backed state
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}
