//! # cinelist-core
//!
//! Persisted client state for Cinelist, a movie discovery and wishlist app:
//! - Local accounts with registration, login and a restorable session
//! - Catalog API key override tied to the login session
//! - Movie wishlist with derived statistics and JSON export/import
//! - Pluggable key-value storage (file-backed or in-memory)

pub mod account;
pub mod catalog;
pub mod error;
pub mod settings;
pub mod storage;
pub mod wishlist;
mod app;

#[cfg(test)]
mod test_utils;

pub use app::Cinelist;
pub use error::{Locale, Result, StoreError};
pub use account::{Account, AccountStore};
pub use catalog::{ApiKeyOverride, CatalogCredentials, CatalogEntry, CatalogQuery};
pub use settings::{CatalogSettings, Settings, SettingsManager};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use wishlist::{WishlistItem, WishlistStats, WishlistStore};
