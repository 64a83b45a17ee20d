//! The `Entity` trait every registry record type implements.

use serde::{de::DeserializeOwned, Serialize};

use crate::field::Field;

/// A typed foreign key held by a record: `collection` names the target
/// entity's storage key, `id` the referenced record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    pub collection: &'static str,
    pub id: u64,
}

impl Reference {
    pub const fn new(collection: &'static str, id: u64) -> Self {
        Self { collection, id }
    }
}

/// Trait implemented by record types to declare how the registry stores,
/// validates and searches them.
///
/// Records serialize to a JSON object carrying at least `id`, `createdAt`
/// and `updatedAt`; the commit path writes those three keys itself.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Durable storage key of the collection, e.g. `"customers"`.
    const COLLECTION: &'static str;

    /// Singular human name used in messages, e.g. `"customer"`.
    const LABEL: &'static str;

    /// Form fields, validated and coerced on every commit.
    const FIELDS: &'static [Field];

    /// JSON names of the fields matched by free-text search.
    const SEARCH_FIELDS: &'static [&'static str];

    fn id(&self) -> u64;

    fn created_at(&self) -> &str;

    fn updated_at(&self) -> &str;

    /// Current status value, for entities that carry one.
    fn status(&self) -> Option<&str> {
        None
    }

    /// Foreign keys this record holds.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Recompute derived fields. Called on every commit after coercion.
    fn normalize(&mut self) {}
}
