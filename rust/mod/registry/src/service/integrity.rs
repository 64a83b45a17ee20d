//! Restrict-on-delete: who still points at a record.

use fabdesk_store::{Entity, EntityStore};

use super::Registry;

use crate::model::{
    CostRecord, Material, MaterialPrice, ProcessingRecord, Project, ScheduleTask, Shipment,
    Transaction,
};

fn count_refs<T: Entity>(store: &EntityStore<T>, collection: &str, id: u64) -> usize {
    store
        .load()
        .iter()
        .filter(|r| {
            r.references()
                .iter()
                .any(|x| x.collection == collection && x.id == id)
        })
        .count()
}

impl Registry {
    /// Collections holding records that refer to `collection`/`id`, with
    /// how many records each. Empty when nothing refers to it.
    pub fn referrers(&self, collection: &str, id: u64) -> Vec<(&'static str, usize)> {
        let counts = [
            (MaterialPrice::COLLECTION, count_refs(&self.material_prices, collection, id)),
            (Material::COLLECTION, count_refs(&self.materials, collection, id)),
            (Transaction::COLLECTION, count_refs(&self.transactions, collection, id)),
            (Shipment::COLLECTION, count_refs(&self.shipments, collection, id)),
            (
                ProcessingRecord::COLLECTION,
                count_refs(&self.processing_records, collection, id),
            ),
            (Project::COLLECTION, count_refs(&self.projects, collection, id)),
            (ScheduleTask::COLLECTION, count_refs(&self.schedule_tasks, collection, id)),
            (CostRecord::COLLECTION, count_refs(&self.cost_records, collection, id)),
        ];
        counts.into_iter().filter(|(_, n)| *n > 0).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::seed::Seed;
    use crate::service::Registry;

    #[test]
    fn referrers_of_demo_records() {
        let reg = Registry::in_memory(Seed::demo()).unwrap();
        assert_eq!(
            reg.referrers("suppliers", 2),
            vec![("material_prices", 1), ("materials", 3), ("cost_records", 1)]
        );
        assert_eq!(reg.referrers("materials", 1), vec![("shipments", 1), ("processing_records", 1)]);
        assert!(reg.referrers("materials", 4).is_empty());
        assert_eq!(reg.referrers("projects", 1), vec![("schedule_tasks", 4), ("cost_records", 4)]);
    }
}
