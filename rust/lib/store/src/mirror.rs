//! Mirror: binds one entity collection to one key of a durable KVStore.
//!
//! The whole collection is written as a JSON array under
//! `Entity::COLLECTION` on every persist, together with the id sequence's
//! high-water mark under `{COLLECTION}:seq`. There is no schema versioning:
//! a record shape change makes older JSON fail to decode on hydrate.

use std::marker::PhantomData;
use std::sync::Arc;

use fabdesk_core::ServiceError;
use fabdesk_kv::{KVError, KVStore};
use tracing::{debug, warn};

use crate::entity::Entity;

/// What a hydrate found in durable storage.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub records: Vec<T>,
    /// Highest id ever handed out, if recorded.
    pub last_id: Option<u64>,
}

/// Durable mirror of one entity collection.
pub struct Mirror<T: Entity> {
    kv: Arc<dyn KVStore>,
    _phantom: PhantomData<T>,
}

impl<T: Entity> Clone for Mirror<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.kv))
    }
}

impl<T: Entity> Mirror<T> {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            _phantom: PhantomData,
        }
    }

    pub fn key() -> &'static str {
        T::COLLECTION
    }

    fn seq_key() -> String {
        format!("{}:seq", T::COLLECTION)
    }

    fn kv_err(e: KVError) -> ServiceError {
        ServiceError::Storage(format!("{}: {}", T::COLLECTION, e))
    }

    /// Read the collection. `Ok(None)` means the key was never written.
    pub fn hydrate(&self) -> Result<Option<Snapshot<T>>, ServiceError> {
        let Some(bytes) = self.kv.get(Self::key()).map_err(Self::kv_err)? else {
            debug!("mirror {}: nothing stored", T::COLLECTION);
            return Ok(None);
        };
        let records: Vec<T> = serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::Storage(format!("{}: stored data does not decode: {}", T::COLLECTION, e))
        })?;

        let last_id = match self.kv.get(&Self::seq_key()).map_err(Self::kv_err)? {
            Some(raw) => {
                let parsed = std::str::from_utf8(&raw)
                    .ok()
                    .and_then(|s| s.trim().parse::<u64>().ok());
                if parsed.is_none() {
                    // Ids restart from the highest stored record.
                    warn!(
                        "mirror {}: unreadable sequence {:?}, ignoring it",
                        T::COLLECTION,
                        String::from_utf8_lossy(&raw)
                    );
                }
                parsed
            }
            None => None,
        };

        debug!("mirror {}: hydrated {} records", T::COLLECTION, records.len());
        Ok(Some(Snapshot { records, last_id }))
    }

    /// Write the full collection and the sequence high-water mark in one batch.
    pub fn persist(&self, records: &[T], last_id: u64) -> Result<(), ServiceError> {
        let bytes = serde_json::to_vec(records)
            .map_err(|e| ServiceError::Internal(format!("serialize {}: {}", T::COLLECTION, e)))?;
        let seq = last_id.to_string();
        let seq_key = Self::seq_key();
        self.kv
            .batch_set(&[(Self::key(), bytes.as_slice()), (seq_key.as_str(), seq.as_bytes())])
            .map_err(Self::kv_err)?;
        debug!("mirror {}: persisted {} records", T::COLLECTION, records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{part, Part};

    fn make_mirror() -> (Mirror<Part>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let kv: Arc<dyn KVStore> =
            Arc::new(fabdesk_kv::RedbStore::open(&dir.path().join("test.redb")).unwrap());
        (Mirror::new(kv), dir)
    }

    #[test]
    fn never_written_is_none() {
        let (mirror, _dir) = make_mirror();
        assert!(mirror.hydrate().unwrap().is_none());
    }

    #[test]
    fn persist_then_hydrate() {
        let (mirror, _dir) = make_mirror();
        let records = vec![part(1, "A"), part(4, "B")];
        mirror.persist(&records, 9).unwrap();

        let snap = mirror.hydrate().unwrap().unwrap();
        assert_eq!(snap.records, records);
        assert_eq!(snap.last_id, Some(9));
    }

    #[test]
    fn empty_collection_is_not_none() {
        let (mirror, _dir) = make_mirror();
        mirror.persist(&[], 0).unwrap();
        let snap = mirror.hydrate().unwrap().unwrap();
        assert!(snap.records.is_empty());
    }

    #[test]
    fn garbage_is_a_storage_error() {
        let kv: Arc<dyn KVStore> = Arc::new(fabdesk_kv::MemoryKV::new());
        kv.set("parts", b"{not json").unwrap();
        let err = Mirror::<Part>::new(kv).hydrate().unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.to_string().contains("does not decode"));
    }

    #[test]
    fn unreadable_sequence_is_ignored() {
        let kv: Arc<dyn KVStore> = Arc::new(fabdesk_kv::MemoryKV::new());
        let mirror = Mirror::<Part>::new(kv.clone());
        mirror.persist(&[part(3, "A")], 7).unwrap();
        kv.set("parts:seq", b"abc").unwrap();

        let snap = mirror.hydrate().unwrap().unwrap();
        assert_eq!(snap.records.len(), 1);
        assert_eq!(snap.last_id, None);
    }
}
