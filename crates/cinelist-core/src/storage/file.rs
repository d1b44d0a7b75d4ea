//! File storage backend
//!
//! Keeps every slot in a single JSON file in the user's data directory.
//! The file is read once when opened and rewritten after each change.

use directories::ProjectDirs;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::{Result, StoreError};

const STORAGE_FILE: &str = "storage.json";
const FILE_VERSION: u32 = 1;

/// File format for persistent storage
#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageFile {
    version: u32,
    entries: HashMap<String, String>,
}

/// File-backed storage
pub struct FileStorage {
    /// Directory for storage files
    storage_dir: PathBuf,
    /// In-memory copy of the file
    entries: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Open storage in a custom directory
    pub fn with_dir(storage_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&storage_dir)?;

        let entries = Self::load(&storage_dir.join(STORAGE_FILE))?;
        debug!(
            "File storage opened at {:?} with {} entries",
            storage_dir,
            entries.len()
        );

        Ok(Self {
            storage_dir,
            entries: RwLock::new(entries),
        })
    }

    /// Get the default data directory
    pub fn default_dir() -> Result<PathBuf> {
        ProjectDirs::from("com", "cinelist", "cinelist")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| StoreError::Storage("Could not determine data directory".to_string()))
    }

    fn storage_file_path(&self) -> PathBuf {
        self.storage_dir.join(STORAGE_FILE)
    }

    fn load(path: &Path) -> Result<HashMap<String, String>> {
        if !path.exists() {
            debug!("No existing storage file found");
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(path)?;
        match serde_json::from_str::<StorageFile>(&contents) {
            Ok(file) => Ok(file.entries),
            Err(e) => {
                warn!("Storage file {:?} is corrupt, starting empty: {}", path, e);
                Ok(HashMap::new())
            }
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        let file = StorageFile {
            version: FILE_VERSION,
            entries: entries.clone(),
        };
        let contents = serde_json::to_string_pretty(&file)?;
        let path = self.storage_file_path();

        // Write atomically using a temp file
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, &contents)?;
        std::fs::rename(&temp_path, &path)?;

        debug!("Saved {} entries to storage", entries.len());
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.save(&updated)?;
        *entries = updated;

        debug!("Stored key: {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write();

        if entries.contains_key(key) {
            let mut updated = entries.clone();
            updated.remove(key);
            self.save(&updated)?;
            *entries = updated;
            debug!("Deleted key: {}", key);
        }

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "File Storage"
    }
}
