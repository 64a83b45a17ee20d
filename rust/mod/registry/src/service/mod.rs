pub mod dynamic;
mod integrity;

use std::sync::Arc;

use fabdesk_core::ServiceError;
use fabdesk_kv::KVStore;
use fabdesk_store::{
    EditSession, Entity, EntityStore, IdIndex, ImportReport, Mirror, Query, sheet,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::model::*;
use crate::seed::Seed;

pub use dynamic::Kind;

/// Every entity store of the back office, plus the rules that
/// span stores (reference checks, restrict-on-delete, related search).
pub struct Registry {
    pub(crate) customers: EntityStore<Customer>,
    pub(crate) suppliers: EntityStore<Supplier>,
    pub(crate) material_prices: EntityStore<MaterialPrice>,
    pub(crate) materials: EntityStore<Material>,
    pub(crate) transactions: EntityStore<Transaction>,
    pub(crate) shipments: EntityStore<Shipment>,
    pub(crate) processing_records: EntityStore<ProcessingRecord>,
    pub(crate) logistics: EntityStore<LogisticsRecord>,
    pub(crate) employees: EntityStore<Employee>,
    pub(crate) projects: EntityStore<Project>,
    pub(crate) schedule_tasks: EntityStore<ScheduleTask>,
    pub(crate) cost_records: EntityStore<CostRecord>,
    pub(crate) alert_rules: EntityStore<AlertRule>,
}

/// Record types held by a [`Registry`]; gives generic code its store.
pub trait Managed: Entity {
    fn store(reg: &Registry) -> &EntityStore<Self>;
    fn store_mut(reg: &mut Registry) -> &mut EntityStore<Self>;
}

macro_rules! managed {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            impl Managed for $ty {
                fn store(reg: &Registry) -> &EntityStore<Self> {
                    &reg.$field
                }

                fn store_mut(reg: &mut Registry) -> &mut EntityStore<Self> {
                    &mut reg.$field
                }
            }
        )+

        impl Registry {
            /// Ids of every store, for reference checks.
            fn id_index(&self) -> IdIndex {
                let mut index = IdIndex::new();
                $(index.add(&self.$field);)+
                index
            }

            /// Whether any store failed its last persist.
            pub fn is_divergent(&self) -> bool {
                false $(|| self.$field.is_divergent())+
            }

            /// Record count per collection.
            pub fn counts(&self) -> Vec<(&'static str, usize)> {
                vec![$((<$ty as Entity>::COLLECTION, self.$field.len())),+]
            }
        }
    };
}

managed! {
    Customer => customers,
    Supplier => suppliers,
    MaterialPrice => material_prices,
    Material => materials,
    Transaction => transactions,
    Shipment => shipments,
    ProcessingRecord => processing_records,
    LogisticsRecord => logistics,
    Employee => employees,
    Project => projects,
    ScheduleTask => schedule_tasks,
    CostRecord => cost_records,
    AlertRule => alert_rules,
}

impl Registry {
    /// Open every store against `kv`. Collections already in storage win;
    /// `seed` only fills collections that were never written.
    pub fn open(kv: Arc<dyn KVStore>, seed: Seed) -> Result<Self, ServiceError> {
        let reg = Self {
            customers: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.customers)?,
            suppliers: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.suppliers)?,
            material_prices: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.material_prices)?,
            materials: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.materials)?,
            transactions: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.transactions)?,
            shipments: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.shipments)?,
            processing_records: EntityStore::open(
                Mirror::new(Arc::clone(&kv)),
                seed.processing_records,
            )?,
            logistics: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.logistics)?,
            employees: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.employees)?,
            projects: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.projects)?,
            schedule_tasks: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.schedule_tasks)?,
            cost_records: EntityStore::open(Mirror::new(Arc::clone(&kv)), seed.cost_records)?,
            alert_rules: EntityStore::open(Mirror::new(kv), seed.alert_rules)?,
        };
        info!("registry opened: {:?}", reg.counts());
        Ok(reg)
    }

    /// A registry with no durable backing.
    pub fn in_memory(seed: Seed) -> Result<Self, ServiceError> {
        Ok(Self {
            customers: EntityStore::in_memory(seed.customers)?,
            suppliers: EntityStore::in_memory(seed.suppliers)?,
            material_prices: EntityStore::in_memory(seed.material_prices)?,
            materials: EntityStore::in_memory(seed.materials)?,
            transactions: EntityStore::in_memory(seed.transactions)?,
            shipments: EntityStore::in_memory(seed.shipments)?,
            processing_records: EntityStore::in_memory(seed.processing_records)?,
            logistics: EntityStore::in_memory(seed.logistics)?,
            employees: EntityStore::in_memory(seed.employees)?,
            projects: EntityStore::in_memory(seed.projects)?,
            schedule_tasks: EntityStore::in_memory(seed.schedule_tasks)?,
            cost_records: EntityStore::in_memory(seed.cost_records)?,
            alert_rules: EntityStore::in_memory(seed.alert_rules)?,
        })
    }

    // ── Reads ──

    pub fn store<T: Managed>(&self) -> &EntityStore<T> {
        T::store(self)
    }

    pub fn list<T: Managed>(&self) -> &[T] {
        T::store(self).load()
    }

    pub fn get<T: Managed>(&self, id: u64) -> Result<&T, ServiceError> {
        T::store(self).get_or_err(id)
    }

    /// Query view over one store.
    pub fn query<T: Managed>(&self, query: &Query) -> Vec<&T> {
        query.apply(T::store(self).load())
    }

    /// Like [`query`](Self::query), but the term also matches the display
    /// name of any record the row references (a transaction is found by
    /// its customer's name, a price by its supplier's).
    pub fn search_with_related<T: Managed>(&self, query: &Query) -> Vec<&T> {
        T::store(self)
            .load()
            .iter()
            .filter(|r| query.matches_with(*r, &self.related_names(*r)))
            .collect()
    }

    fn related_names<T: Entity>(&self, record: &T) -> Vec<String> {
        record
            .references()
            .into_iter()
            .filter_map(|r| self.display_name(r.collection, r.id))
            .collect()
    }

    /// Human name of a record, for the collections that have one.
    pub fn display_name(&self, collection: &str, id: u64) -> Option<String> {
        match collection {
            "customers" => self.customers.get(id).map(|c| c.name.clone()),
            "suppliers" => self.suppliers.get(id).map(|s| s.name.clone()),
            "materials" => self.materials.get(id).map(|m| m.name.clone()),
            "employees" => self.employees.get(id).map(|e| e.name.clone()),
            "projects" => self.projects.get(id).map(|p| p.name.clone()),
            _ => None,
        }
    }

    // ── Writes ──

    /// Commit an open edit session against the right store, checking the
    /// record's references against every other store.
    pub fn commit<T: Managed>(&mut self, session: &mut EditSession<T>) -> Result<T, ServiceError> {
        let refs = self.id_index();
        fabdesk_store::commit(T::store_mut(self), session, &refs)
    }

    /// Create a record from raw form values.
    pub fn create<T: Managed>(&mut self, fields: &Map<String, Value>) -> Result<T, ServiceError> {
        let mut session = EditSession::new();
        session.open_create();
        session.stage_all(fields)?;
        self.commit(&mut session)
    }

    /// Edit record `id`; fields not in `fields` keep their value.
    pub fn update<T: Managed>(
        &mut self,
        id: u64,
        fields: &Map<String, Value>,
    ) -> Result<T, ServiceError> {
        let mut session = EditSession::new();
        session.open_edit(self.get::<T>(id)?)?;
        session.stage_all(fields)?;
        self.commit(&mut session)
    }

    /// Delete record `id`. Refused while other records still refer to it.
    pub fn delete<T: Managed>(&mut self, id: u64) -> Result<T, ServiceError> {
        self.get::<T>(id)?;
        let referrers = self.referrers(T::COLLECTION, id);
        if !referrers.is_empty() {
            let list: Vec<String> = referrers
                .iter()
                .map(|(collection, n)| format!("{} {}", n, collection))
                .collect();
            return Err(ServiceError::Reference(format!(
                "{} {} is still referenced by {}",
                T::LABEL,
                id,
                list.join(", ")
            )));
        }
        fabdesk_store::delete(T::store_mut(self), id)
    }

    // ── Spreadsheet ──

    pub fn export<T: Managed>(&self) -> Result<String, ServiceError> {
        sheet::export(T::store(self).load())
    }

    /// Import CSV rows as new records. Every row is validated and checked
    /// against the other stores like a form submit.
    pub fn import<T: Managed>(&mut self, text: &str) -> Result<ImportReport, ServiceError> {
        let refs = self.id_index();
        Ok(sheet::import(T::store_mut(self), text, &refs)?)
    }
}
