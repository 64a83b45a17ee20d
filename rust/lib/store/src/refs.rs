//! Reference lookups used by the commit path.

use std::collections::{HashMap, HashSet};

use crate::entity::Entity;
use crate::store::EntityStore;

/// Answers "does record `id` exist in `collection`?" for foreign-key checks.
pub trait ReferenceCheck {
    fn exists(&self, collection: &str, id: u64) -> bool;
}

/// Resolves every reference. For stores with no foreign keys.
pub struct NoReferences;

impl ReferenceCheck for NoReferences {
    fn exists(&self, _collection: &str, _id: u64) -> bool {
        true
    }
}

/// Snapshot of the ids present in a set of stores.
///
/// Built before a commit so the target store can be borrowed mutably while
/// the others are consulted.
#[derive(Debug, Default, Clone)]
pub struct IdIndex {
    ids: HashMap<&'static str, HashSet<u64>>,
}

impl IdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<T: Entity>(&mut self, store: &EntityStore<T>) -> &mut Self {
        self.ids
            .insert(T::COLLECTION, store.load().iter().map(Entity::id).collect());
        self
    }
}

impl ReferenceCheck for IdIndex {
    fn exists(&self, collection: &str, id: u64) -> bool {
        self.ids.get(collection).is_some_and(|set| set.contains(&id))
    }
}
