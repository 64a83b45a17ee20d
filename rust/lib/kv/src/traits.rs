use crate::error::KVError;

/// KVStore is the durable key-value collaborator behind every entity mirror.
///
/// Keys are short fixed names, one per entity collection (`customers`,
/// `material_prices`, ...). Values are opaque bytes; the mirror layer stores
/// a whole collection as one JSON array under its key.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Set several pairs at once. Backends with transactions apply them atomically.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Scan all keys matching a prefix. Returns sorted (key, value) pairs.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}
