use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::KVError;
use crate::traits::KVStore;

/// MemoryKV keeps everything in a sorted map. Nothing survives the process.
///
/// Used for ephemeral sessions (`fabdesk --memory`) and in tests.
#[derive(Default)]
pub struct MemoryKV {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryKV {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>, KVError> {
        self.entries
            .read()
            .map_err(|_| KVError::Storage("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>, KVError> {
        self.entries
            .write()
            .map_err(|_| KVError::Storage("memory store lock poisoned".into()))
    }
}

impl KVStore for MemoryKV {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.write()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let mut map = self.write()?;
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_vec());
        }
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let map = self.read()?;
        Ok(map
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_ops() {
        let kv = MemoryKV::new();
        assert!(kv.is_empty());
        kv.set("logistics", b"[]").unwrap();
        assert_eq!(kv.len(), 1);
        assert_eq!(kv.get("logistics").unwrap(), Some(b"[]".to_vec()));
        assert!(kv.get("projects").unwrap().is_none());
    }

    #[test]
    fn scan_is_sorted_and_prefixed() {
        let kv = MemoryKV::new();
        kv.batch_set(&[("b", b"2"), ("a2", b"1"), ("a1", b"0")]).unwrap();
        let hits = kv.scan("a").unwrap();
        assert_eq!(
            hits,
            vec![("a1".to_string(), b"0".to_vec()), ("a2".to_string(), b"1".to_vec())]
        );
    }
}
