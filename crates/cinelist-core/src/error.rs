//! Error types for cinelist-core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Language used for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid email address")]
    InvalidIdentifier,

    #[error("Password must be at least {min} characters")]
    WeakSecret { min: usize },

    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Persisted slot could not be decoded. Stores log and swallow this.
    #[error("Persisted data in '{slot}' is corrupt: {reason}")]
    PersistenceCorrupt { slot: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this error comes from user input and can be fixed by retrying.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier
                | Self::WeakSecret { .. }
                | Self::DuplicateAccount
                | Self::InvalidCredentials
        )
    }

    /// Localized message for display next to a form.
    ///
    /// Internal errors fall back to their `Display` text.
    pub fn user_message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::InvalidIdentifier, Locale::Ko) => {
                "유효한 이메일 주소를 입력해주세요.".to_string()
            }
            (Self::WeakSecret { min }, Locale::Ko) => {
                format!("비밀번호는 {}자 이상 입력해주세요.", min)
            }
            (Self::DuplicateAccount, Locale::Ko) => "이미 가입된 이메일입니다.".to_string(),
            (Self::InvalidCredentials, Locale::Ko) => {
                "아이디 또는 비밀번호가 올바르지 않습니다.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
