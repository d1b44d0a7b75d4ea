//! JSON encoding of individual storage slots

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;
use crate::error::{Result, StoreError};

/// Read and decode a JSON slot.
///
/// Undecodable contents surface as `PersistenceCorrupt`; backend failures
/// pass through unchanged.
pub fn read_json<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match storage.get(key)? {
        Some(raw) if !raw.is_empty() => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::PersistenceCorrupt {
                slot: key.to_string(),
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}

/// Encode a value as compact JSON and write it to a slot
pub fn write_json<T: Serialize + ?Sized>(storage: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_round_trip_and_missing() {
        let storage = MemoryStorage::new();

        assert_eq!(read_json::<Vec<u32>>(&storage, "numbers").unwrap(), None);

        write_json(&storage, "numbers", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(storage.get("numbers").unwrap(), Some("[1,2,3]".to_string()));
        assert_eq!(
            read_json::<Vec<u32>>(&storage, "numbers").unwrap(),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_corrupt_slot() {
        let storage = MemoryStorage::new();
        storage.set("numbers", "[1, 2,").unwrap();

        let err = read_json::<Vec<u32>>(&storage, "numbers").unwrap_err();
        assert!(matches!(err, StoreError::PersistenceCorrupt { ref slot, .. } if slot == "numbers"));
    }
}
