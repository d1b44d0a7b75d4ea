//! Wishlist store

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::types::{StoredWishlistItem, WishlistItem, WishlistStats};
use crate::catalog::CatalogEntry;
use crate::error::{Result, StoreError};
use crate::storage::{read_json, write_json, KeyValueStore, WISHLIST_KEY};

/// Saved movies in add order, written through to storage on every change
pub struct WishlistStore {
    storage: Arc<dyn KeyValueStore>,
    items: Vec<WishlistItem>,
}

impl WishlistStore {
    /// Load the wishlist from `storage`.
    ///
    /// Corrupt data yields an empty wishlist. Items without `addedAt` get the
    /// load time; that backfill is written on the next change only.
    pub fn init(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let items = match read_json::<Vec<StoredWishlistItem>>(storage.as_ref(), WISHLIST_KEY) {
            Ok(stored) => Self::migrate(stored.unwrap_or_default()),
            Err(StoreError::PersistenceCorrupt { reason, .. }) => {
                warn!("Failed to load wishlist, starting empty: {}", reason);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        debug!("Loaded {} wishlist items", items.len());
        Ok(Self { storage, items })
    }

    fn migrate(stored: Vec<StoredWishlistItem>) -> Vec<WishlistItem> {
        let now = Utc::now();
        stored.into_iter().map(|item| item.into_item(now)).collect()
    }

    /// Write `items` and adopt them only once the write succeeded
    fn commit(&mut self, items: Vec<WishlistItem>) -> Result<()> {
        write_json(self.storage.as_ref(), WISHLIST_KEY, &items)?;
        self.items = items;
        debug!("Persisted {} wishlist items", self.items.len());
        Ok(())
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Add `entry` if absent, remove it if present
    pub fn toggle(&mut self, entry: &CatalogEntry) -> Result<()> {
        let mut items = self.items.clone();
        match self.position(entry.id) {
            Some(index) => {
                items.remove(index);
                debug!("Removing {} from wishlist", entry.id);
            }
            None => {
                items.push(WishlistItem::from_entry(entry, Utc::now()));
                debug!("Adding {} to wishlist", entry.id);
            }
        }
        self.commit(items)
    }

    /// Remove the item with `id`; nothing is written if it is absent
    pub fn remove(&mut self, id: i64) -> Result<()> {
        if let Some(index) = self.position(id) {
            let mut items = self.items.clone();
            items.remove(index);
            self.commit(items)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())?;
        info!("Cleared wishlist");
        Ok(())
    }

    pub fn contains(&self, id: i64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn stats(&self) -> WishlistStats {
        WishlistStats::compute(&self.items)
    }

    /// Pretty-printed JSON snapshot of the whole wishlist
    pub fn export(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    /// Overwrite the wishlist with `items`.
    ///
    /// Later duplicates of an id are dropped, so at most one item per id is
    /// ever stored.
    pub fn replace(&mut self, items: Vec<WishlistItem>) -> Result<()> {
        let mut seen = HashSet::new();
        let items: Vec<WishlistItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.id))
            .collect();

        self.commit(items)?;
        info!("Replaced wishlist with {} items", self.items.len());
        Ok(())
    }

    /// Restore from an `export` snapshot, returning the stored item count.
    ///
    /// Unparseable input leaves the wishlist untouched.
    pub fn import(&mut self, snapshot: &str) -> Result<usize> {
        let stored: Vec<StoredWishlistItem> = serde_json::from_str(snapshot)?;
        self.replace(Self::migrate(stored))?;
        Ok(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_utils::FlakyStorage;

    fn entry(id: i64, title: &str, rating: f64) -> CatalogEntry {
        CatalogEntry {
            id,
            title: title.to_string(),
            overview: format!("{} overview", title),
            poster_path: Some(format!("/{}.jpg", id)),
            backdrop_path: None,
            vote_average: rating,
            release_date: "2021-06-01".to_string(),
            genre_ids: Some(vec![18]),
        }
    }

    fn init_store(storage: &Arc<MemoryStorage>) -> WishlistStore {
        WishlistStore::init(storage.clone()).unwrap()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = init_store(&storage);
        let movie = entry(550, "Fight Club", 8.4);

        store.toggle(&movie).unwrap();
        assert!(store.contains(550));
        assert_eq!(store.items()[0].title, "Fight Club");
        assert_eq!(store.items()[0].poster_path.as_deref(), Some("/550.jpg"));

        store.toggle(&movie).unwrap();
        assert!(!store.contains(550));
        assert!(store.items().is_empty());
        assert_eq!(storage.get(WISHLIST_KEY).unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_add_order_and_persistence() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = init_store(&storage);
            store.toggle(&entry(3, "C", 6.0)).unwrap();
            store.toggle(&entry(1, "A", 7.0)).unwrap();
            store.toggle(&entry(2, "B", 8.0)).unwrap();
        }

        let store = init_store(&storage);
        let ids: Vec<i64> = store.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_snapshot_ignores_later_catalog_changes() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = init_store(&storage);
        let mut movie = entry(7, "Before", 6.0);

        store.toggle(&movie).unwrap();
        movie.title = "After".to_string();

        assert_eq!(store.items()[0].title, "Before");
    }

    #[test]
    fn test_remove_missing_does_not_write() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = init_store(&storage);

        store.remove(42).unwrap();
        assert_eq!(storage.get(WISHLIST_KEY).unwrap(), None);

        store.toggle(&entry(42, "X", 5.0)).unwrap();
        store.remove(42).unwrap();
        assert!(!store.contains(42));
        assert_eq!(storage.get(WISHLIST_KEY).unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_clear() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = init_store(&storage);
        store.toggle(&entry(1, "A", 7.0)).unwrap();
        store.toggle(&entry(2, "B", 8.0)).unwrap();

        store.clear().unwrap();
        assert!(store.items().is_empty());
        assert!(init_store(&storage).items().is_empty());
    }

    #[test]
    fn test_stats() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = init_store(&storage);
        assert_eq!(store.stats().total, 0);
        assert_eq!(store.stats().latest_title, "");

        store.toggle(&entry(1, "A", 7.2)).unwrap();
        store.toggle(&entry(2, "B", 8.0)).unwrap();
        store.toggle(&entry(3, "C", 6.5)).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average_rating, 7.2);
        assert!(!stats.latest_added_at.is_empty());
    }

    #[test]
    fn test_legacy_items_are_backfilled() {
        let storage = Arc::new(MemoryStorage::new());
        let legacy = r#"[{"id":1,"title":"Old","poster_path":null,"vote_average":7.5,"release_date":"2001-01-01","overview":"..."}]"#;
        storage.set(WISHLIST_KEY, legacy).unwrap();

        let store = init_store(&storage);
        assert_eq!(store.items().len(), 1);
        assert!(!store.stats().latest_added_at.is_empty());
        // not written back until the next change
        assert_eq!(storage.get(WISHLIST_KEY).unwrap(), Some(legacy.to_string()));
    }

    #[test]
    fn test_corrupt_data_yields_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(WISHLIST_KEY, "{{{").unwrap();

        let store = init_store(&storage);
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_export_and_import() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = init_store(&storage);
        store.toggle(&entry(1, "A", 7.0)).unwrap();
        store.toggle(&entry(2, "B", 8.0)).unwrap();

        let snapshot = store.export().unwrap();
        assert!(snapshot.contains('\n'));
        assert!(snapshot.contains("\"addedAt\""));

        let other = Arc::new(MemoryStorage::new());
        let mut restored = init_store(&other);
        assert_eq!(restored.import(&snapshot).unwrap(), 2);
        assert_eq!(restored.items(), store.items());
        assert_eq!(init_store(&other).items(), store.items());
    }

    #[test]
    fn test_import_drops_duplicates_and_rejects_garbage() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = init_store(&storage);
        store.toggle(&entry(9, "Keep", 5.0)).unwrap();

        assert!(matches!(
            store.import("not a snapshot"),
            Err(StoreError::Serialization(_))
        ));
        assert!(store.contains(9));

        let snapshot = r#"[{"id":1,"title":"First"},{"id":1,"title":"Second"}]"#;
        assert_eq!(store.import(snapshot).unwrap(), 1);
        assert_eq!(store.items()[0].title, "First");
        assert!(!store.contains(9));
    }

    #[test]
    fn test_replace() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = init_store(&storage);
        store.toggle(&entry(1, "A", 7.0)).unwrap();

        let replacement = vec![WishlistItem::from_entry(&entry(5, "E", 9.0), Utc::now())];
        store.replace(replacement.clone()).unwrap();

        assert_eq!(store.items(), replacement.as_slice());
        assert_eq!(init_store(&storage).items(), replacement.as_slice());
    }

    #[test]
    fn test_replace_keeps_one_item_per_id() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = init_store(&storage);
        let movie = entry(550, "Fight Club", 8.4);
        let first = WishlistItem::from_entry(&movie, Utc::now());
        let mut second = first.clone();
        second.title = "Duplicate".to_string();

        store.replace(vec![first, second]).unwrap();
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].title, "Fight Club");
        assert_eq!(init_store(&storage).items().len(), 1);

        store.toggle(&movie).unwrap();
        assert!(!store.contains(550));
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_failed_write_changes_nothing() {
        let storage = Arc::new(FlakyStorage::new());
        let mut store = WishlistStore::init(storage.clone()).unwrap();
        store.toggle(&entry(1, "A", 7.0)).unwrap();
        let before = store.items().to_vec();

        storage.fail_writes(true);
        assert!(store.toggle(&entry(2, "B", 8.0)).is_err());
        assert!(store.toggle(&entry(1, "A", 7.0)).is_err());
        assert!(store.remove(1).is_err());
        assert!(store.clear().is_err());
        assert!(store.replace(Vec::new()).is_err());
        assert_eq!(store.items(), before.as_slice());

        storage.fail_writes(false);
        assert_eq!(WishlistStore::init(storage).unwrap().items(), before.as_slice());
    }
}
