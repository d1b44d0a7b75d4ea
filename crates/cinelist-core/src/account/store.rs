//! Account store: registration, login and the current session

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::session::{self, SessionManager};
use super::types::{is_valid_identifier, Account, MIN_SECRET_LEN};
use crate::catalog::ApiKeyOverride;
use crate::error::{Result, StoreError};
use crate::storage::{read_json, write_json, KeyValueStore, ACCOUNTS_KEY, REMEMBERED_IDENTIFIER_KEY};

/// Local account registry with write-through persistence
pub struct AccountStore {
    storage: Arc<dyn KeyValueStore>,
    sessions: SessionManager,
    api_key: Arc<dyn ApiKeyOverride>,
    accounts: Vec<Account>,
    current: Option<Account>,
    remembered: Option<String>,
}

impl AccountStore {
    /// Load accounts, session and remembered email from `storage`.
    ///
    /// Corrupt slots are logged and treated as empty; a corrupt session slot
    /// is also removed. A restored session re-applies the API key override.
    pub fn init(storage: Arc<dyn KeyValueStore>, api_key: Arc<dyn ApiKeyOverride>) -> Result<Self> {
        let sessions = SessionManager::new(storage.clone());

        let accounts = match read_json::<Vec<Account>>(storage.as_ref(), ACCOUNTS_KEY) {
            Ok(accounts) => accounts.unwrap_or_default(),
            Err(StoreError::PersistenceCorrupt { reason, .. }) => {
                warn!("Failed to load stored accounts, starting empty: {}", reason);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let current = match sessions.load_session() {
            Ok(session) => session,
            Err(StoreError::PersistenceCorrupt { reason, .. }) => {
                warn!("Failed to restore login session: {}", reason);
                if let Err(e) = sessions.clear_session() {
                    warn!("Failed to remove corrupt session: {}", e);
                }
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(account) = &current {
            if !account.secret.is_empty() {
                api_key.apply(&account.secret)?;
            }
            debug!("Restored session for {}", account.identifier);
        }

        let remembered = storage
            .get(REMEMBERED_IDENTIFIER_KEY)?
            .filter(|id| !id.is_empty());

        debug!("Loaded {} accounts", accounts.len());

        Ok(Self {
            storage,
            sessions,
            api_key,
            accounts,
            current,
            remembered,
        })
    }

    /// Register a new account. Does not log in.
    pub fn register(&mut self, identifier: &str, secret: &str) -> Result<()> {
        if !is_valid_identifier(identifier) {
            return Err(StoreError::InvalidIdentifier);
        }
        // counted in UTF-16 units like the browser client's `length`
        if secret.encode_utf16().count() < MIN_SECRET_LEN {
            return Err(StoreError::WeakSecret { min: MIN_SECRET_LEN });
        }
        if self.accounts.iter().any(|a| a.identifier == identifier) {
            return Err(StoreError::DuplicateAccount);
        }

        let mut accounts = self.accounts.clone();
        accounts.push(Account::new(identifier, secret));
        write_json(self.storage.as_ref(), ACCOUNTS_KEY, &accounts)?;
        self.accounts = accounts;

        info!("Registered account {}", identifier);
        Ok(())
    }

    /// Log in with an exact identifier/secret match.
    ///
    /// On success the session is persisted, the account secret becomes the
    /// catalog API key, and the remembered email is set or cleared.
    pub fn login(&mut self, identifier: &str, secret: &str, remember: bool) -> Result<()> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.matches(identifier, secret))
            .cloned()
            .ok_or(StoreError::InvalidCredentials)?;

        self.sessions.save_session(&account)?;
        self.api_key.apply(&account.secret)?;
        self.current = Some(account);

        if remember {
            self.storage.set(REMEMBERED_IDENTIFIER_KEY, identifier)?;
            self.remembered = Some(identifier.to_string());
        } else {
            self.storage.remove(REMEMBERED_IDENTIFIER_KEY)?;
            self.remembered = None;
        }

        info!("Logged in as {}", identifier);
        Ok(())
    }

    /// Clear the session and revert the catalog API key to its default
    pub fn logout(&mut self) -> Result<()> {
        self.current = None;
        self.sessions.clear_session()?;
        self.api_key.revoke()?;

        info!("Logged out");
        Ok(())
    }

    /// Whether a session is persisted; usable without an `AccountStore`
    pub fn is_authenticated(storage: &dyn KeyValueStore) -> bool {
        session::is_authenticated(storage)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.current.as_ref()
    }

    /// Email to prefill the login form with
    pub fn remembered_identifier(&self) -> Option<&str> {
        self.remembered.as_deref()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}
