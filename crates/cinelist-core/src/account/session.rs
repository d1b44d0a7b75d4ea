//! Login session persistence
//!
//! The session slot holds a copy of the logged-in account. Its presence alone
//! decides whether the user counts as authenticated, so route guards can ask
//! before any store is built.

use std::sync::Arc;
use tracing::debug;

use super::types::Account;
use crate::error::Result;
use crate::storage::{read_json, write_json, KeyValueStore, SESSION_KEY};

/// True iff a session is persisted in `storage`.
///
/// Does not decode the slot; storage failures count as logged out.
pub fn is_authenticated(storage: &dyn KeyValueStore) -> bool {
    matches!(storage.get(SESSION_KEY), Ok(Some(raw)) if !raw.is_empty())
}

/// Session slot manager
pub struct SessionManager {
    storage: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Save the logged-in account
    pub fn save_session(&self, account: &Account) -> Result<()> {
        write_json(self.storage.as_ref(), SESSION_KEY, account)?;
        debug!("Saved session for {}", account.identifier);
        Ok(())
    }

    /// Load the persisted session; corrupt contents surface as `PersistenceCorrupt`
    pub fn load_session(&self) -> Result<Option<Account>> {
        read_json(self.storage.as_ref(), SESSION_KEY)
    }

    /// Clear the session (logout, or a slot that failed to decode)
    pub fn clear_session(&self) -> Result<()> {
        self.storage.remove(SESSION_KEY)?;
        debug!("Cleared session");
        Ok(())
    }
}
