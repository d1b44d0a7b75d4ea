//! Account type definitions

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Minimum password length accepted at registration
pub const MIN_SECRET_LEN: usize = 6;

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+@([A-Za-z0-9_\-]+\.)+[A-Za-z0-9_\-]{2,4}$")
        .expect("identifier pattern is valid")
});

/// Check that `identifier` looks like an email address
pub fn is_valid_identifier(identifier: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(identifier)
}

/// A locally registered account
///
/// The field names on disk are the ones the browser client wrote.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Email address, unique across accounts
    #[serde(rename = "id")]
    pub identifier: String,

    /// Password in plain text. Doubles as the catalog API key after login.
    #[serde(rename = "password")]
    pub secret: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(identifier: &str, secret: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Exact, case-sensitive match on both fields
    pub fn matches(&self, identifier: &str, secret: &str) -> bool {
        self.identifier == identifier && self.secret == secret
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}
