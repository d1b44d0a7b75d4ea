//! Test doubles shared by the store tests

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Result, StoreError};
use crate::storage::{KeyValueStore, MemoryStorage};

/// In-memory storage whose writes can be switched to fail
#[derive(Debug, Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `set`/`remove` fail (or succeed again)
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Storage("write rejected".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check()?;
        self.inner.remove(key)
    }

    fn backend_name(&self) -> &'static str {
        "Flaky Storage"
    }
}
