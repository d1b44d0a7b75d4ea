//! Storage trait definitions

use crate::error::Result;

/// Synchronous string key-value storage, the persistence medium for all stores.
///
/// Each key is an independent slot. Writes replace the whole slot value.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key` (no-op if absent)
    fn remove(&self, key: &str) -> Result<()>;

    /// Get a human-readable name for this storage backend
    fn backend_name(&self) -> &'static str;
}
