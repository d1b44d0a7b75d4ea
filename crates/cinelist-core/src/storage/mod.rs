//! Storage backends for persisted client state
//!
//! This module provides two storage backends:
//! 1. File storage in the user's data directory
//! 2. In-memory storage (tests, throwaway sessions)

mod traits;
mod file;
mod memory;
mod slot;

pub use traits::KeyValueStore;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use slot::{read_json, write_json};

/// Slot holding the registered account list
pub const ACCOUNTS_KEY: &str = "wsd-users";
/// Slot holding the logged-in account
pub const SESSION_KEY: &str = "wsd-auth-user";
/// Slot holding the email used to prefill the login form
pub const REMEMBERED_IDENTIFIER_KEY: &str = "wsd-remember-email";
/// Slot holding the catalog API key override
pub const API_KEY_OVERRIDE_KEY: &str = "TMDb-Key";
/// Slot holding the movie wishlist
pub const WISHLIST_KEY: &str = "movieWishlist";
