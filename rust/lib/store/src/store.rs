//! EntityStore: the in-memory collection of one entity type.
//!
//! Every mutation is "compute the new full collection, then `replace`".
//! A store may carry a [`Mirror`]; durable storage is authoritative, and the
//! seed passed at construction is only used when the mirror key has never
//! been written.

use std::collections::HashSet;

use fabdesk_core::ServiceError;
use tracing::{info, warn};

use crate::entity::Entity;
use crate::mirror::Mirror;
use crate::sequence::IdSequence;

pub struct EntityStore<T: Entity> {
    records: Vec<T>,
    seq: IdSequence,
    mirror: Option<Mirror<T>>,
    divergent: bool,
}

impl<T: Entity> EntityStore<T> {
    /// A store without durable backing, starting from `seed`.
    pub fn in_memory(seed: Vec<T>) -> Result<Self, ServiceError> {
        check_unique_ids(&seed)?;
        let mut store = Self {
            records: Vec::new(),
            seq: IdSequence::new(),
            mirror: None,
            divergent: false,
        };
        store.replace(seed);
        Ok(store)
    }

    /// Hydrate from `mirror`. On the first-ever run (key never written) the
    /// store starts from `seed` and persists it straight away.
    ///
    /// Stored data that fails to decode is an error; it is never masked by
    /// the seed.
    pub fn open(mirror: Mirror<T>, seed: Vec<T>) -> Result<Self, ServiceError> {
        let mut store = Self::in_memory(Vec::new())?;
        match mirror.hydrate()? {
            Some(snapshot) => {
                check_unique_ids(&snapshot.records)?;
                store.seq.observe(snapshot.last_id);
                store.replace(snapshot.records);
                store.mirror = Some(mirror);
            }
            None => {
                check_unique_ids(&seed)?;
                info!("{}: first run, seeding {} records", T::COLLECTION, seed.len());
                store.replace(seed);
                store.mirror = Some(mirror);
                store.persist();
            }
        }
        Ok(store)
    }

    /// The current collection in insertion order.
    pub fn load(&self) -> &[T] {
        &self.records
    }

    /// Swap in a new collection. Ids in it are fed to the sequence.
    pub fn replace(&mut self, records: Vec<T>) {
        debug_assert!(check_unique_ids(&records).is_ok());
        self.seq.observe(records.iter().map(Entity::id));
        self.records = records;
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Get a record or return NotFound.
    pub fn get_or_err(&self, id: u64) -> Result<&T, ServiceError> {
        self.get(id)
            .ok_or_else(|| ServiceError::NotFound(format!("{} {} not found", T::LABEL, id)))
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next create will receive.
    pub fn next_id(&self) -> u64 {
        self.seq.peek()
    }

    /// Ask the mirror (if any) to store the current collection.
    ///
    /// Failures are logged and swallowed: the in-memory state stays and the
    /// store is flagged divergent until a later persist succeeds. Returns
    /// whether durable storage is now in sync.
    pub fn persist(&mut self) -> bool {
        let Some(mirror) = &self.mirror else {
            return true;
        };
        match mirror.persist(&self.records, self.seq.last()) {
            Ok(()) => {
                self.divergent = false;
                true
            }
            Err(e) => {
                warn!("{}: persist failed, keeping in-memory state: {}", T::COLLECTION, e);
                self.divergent = true;
                false
            }
        }
    }

    /// Whether the last persist failed, so memory and storage may differ.
    pub fn is_divergent(&self) -> bool {
        self.divergent
    }
}

fn check_unique_ids<T: Entity>(records: &[T]) -> Result<(), ServiceError> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(r.id()) {
            return Err(ServiceError::Conflict(format!(
                "{}: duplicate {} id {}",
                T::COLLECTION,
                T::LABEL,
                r.id()
            )));
        }
    }
    Ok(())
}
