//! Collection-name dispatch for front ends that pick the entity at runtime.
//!
//! Records cross this boundary as JSON values.

use std::fmt;
use std::str::FromStr;

use fabdesk_core::ServiceError;
use fabdesk_store::{Entity, ImportReport, Query, sheet};
use serde::Serialize;
use serde_json::{Map, Value};

use super::Registry;
use crate::model::*;

/// Which store an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Customers,
    Suppliers,
    MaterialPrices,
    Materials,
    Transactions,
    Shipments,
    ProcessingRecords,
    Logistics,
    Employees,
    Projects,
    ScheduleTasks,
    CostRecords,
    AlertRules,
}

/// Run `$body` with `$T` bound to the record type of `$kind`.
macro_rules! dispatch {
    ($kind:expr, $T:ident => $body:expr) => {
        match $kind {
            Kind::Customers => {
                type $T = Customer;
                $body
            }
            Kind::Suppliers => {
                type $T = Supplier;
                $body
            }
            Kind::MaterialPrices => {
                type $T = MaterialPrice;
                $body
            }
            Kind::Materials => {
                type $T = Material;
                $body
            }
            Kind::Transactions => {
                type $T = Transaction;
                $body
            }
            Kind::Shipments => {
                type $T = Shipment;
                $body
            }
            Kind::ProcessingRecords => {
                type $T = ProcessingRecord;
                $body
            }
            Kind::Logistics => {
                type $T = LogisticsRecord;
                $body
            }
            Kind::Employees => {
                type $T = Employee;
                $body
            }
            Kind::Projects => {
                type $T = Project;
                $body
            }
            Kind::ScheduleTasks => {
                type $T = ScheduleTask;
                $body
            }
            Kind::CostRecords => {
                type $T = CostRecord;
                $body
            }
            Kind::AlertRules => {
                type $T = AlertRule;
                $body
            }
        }
    };
}

impl Kind {
    pub const ALL: [Kind; 13] = [
        Kind::Customers,
        Kind::Suppliers,
        Kind::MaterialPrices,
        Kind::Materials,
        Kind::Transactions,
        Kind::Shipments,
        Kind::ProcessingRecords,
        Kind::Logistics,
        Kind::Employees,
        Kind::Projects,
        Kind::ScheduleTasks,
        Kind::CostRecords,
        Kind::AlertRules,
    ];

    /// Storage key of the collection.
    pub fn collection(self) -> &'static str {
        dispatch!(self, T => T::COLLECTION)
    }

    pub fn label(self) -> &'static str {
        dispatch!(self, T => T::LABEL)
    }

    /// Spreadsheet / table columns.
    pub fn columns(self) -> Vec<&'static str> {
        dispatch!(self, T => sheet::columns::<T>())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for Kind {
    type Err = ServiceError;

    /// Accepts the collection name (`material_prices`), with dashes
    /// (`material-prices`), or the singular label (`material-price`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let want = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Kind::ALL
            .into_iter()
            .find(|k| k.collection() == want || k.label().replace(' ', "_") == want)
            .ok_or_else(|| {
                let names: Vec<&str> = Kind::ALL.iter().map(|k| k.collection()).collect();
                ServiceError::Validation(format!(
                    "unknown collection '{}'; expected one of {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

fn to_json<T: Serialize>(record: &T) -> Result<Value, ServiceError> {
    serde_json::to_value(record).map_err(|e| ServiceError::Internal(format!("serialize: {}", e)))
}

impl Registry {
    /// Query a collection. With `related`, the term also matches names of
    /// referenced records.
    pub fn list_json(&self, kind: Kind, query: &Query, related: bool) -> Result<Vec<Value>, ServiceError> {
        dispatch!(kind, T => {
            let hits = if related {
                self.search_with_related::<T>(query)
            } else {
                self.query::<T>(query)
            };
            hits.into_iter().map(to_json).collect()
        })
    }

    pub fn get_json(&self, kind: Kind, id: u64) -> Result<Value, ServiceError> {
        dispatch!(kind, T => to_json(self.get::<T>(id)?))
    }

    pub fn create_json(&mut self, kind: Kind, fields: &Map<String, Value>) -> Result<Value, ServiceError> {
        dispatch!(kind, T => to_json(&self.create::<T>(fields)?))
    }

    pub fn update_json(
        &mut self,
        kind: Kind,
        id: u64,
        fields: &Map<String, Value>,
    ) -> Result<Value, ServiceError> {
        dispatch!(kind, T => to_json(&self.update::<T>(id, fields)?))
    }

    pub fn delete_json(&mut self, kind: Kind, id: u64) -> Result<Value, ServiceError> {
        dispatch!(kind, T => to_json(&self.delete::<T>(id)?))
    }

    pub fn export_kind(&self, kind: Kind) -> Result<String, ServiceError> {
        dispatch!(kind, T => self.export::<T>())
    }

    pub fn import_kind(&mut self, kind: Kind, text: &str) -> Result<ImportReport, ServiceError> {
        dispatch!(kind, T => self.import::<T>(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;
    use serde_json::json;

    #[test]
    fn kind_names() {
        assert_eq!("customers".parse::<Kind>().unwrap(), Kind::Customers);
        assert_eq!("material-prices".parse::<Kind>().unwrap(), Kind::MaterialPrices);
        assert_eq!("Material Price".parse::<Kind>().unwrap(), Kind::MaterialPrices);
        assert_eq!("logistics".parse::<Kind>().unwrap(), Kind::Logistics);
        assert_eq!("schedule-task".parse::<Kind>().unwrap(), Kind::ScheduleTasks);
        assert_eq!("cost-records".parse::<Kind>().unwrap(), Kind::CostRecords);
        assert_eq!("alert rule".parse::<Kind>().unwrap(), Kind::AlertRules);
        let err = "widgets".parse::<Kind>().unwrap_err();
        assert!(err.to_string().contains("customers, suppliers"));
    }

    #[test]
    fn every_kind_lists_and_exports() {
        let reg = Registry::in_memory(Seed::demo()).unwrap();
        for kind in Kind::ALL {
            let rows = reg.list_json(kind, &Query::new(), false).unwrap();
            assert!(!rows.is_empty(), "{} has demo rows", kind);
            let csv = reg.export_kind(kind).unwrap();
            assert_eq!(csv.lines().count(), rows.len() + 1);
            assert_eq!(kind.columns()[0], "id");
        }
    }

    #[test]
    fn json_crud_round() {
        let mut reg = Registry::in_memory(Seed::default()).unwrap();
        let fields = json!({"orderNumber": "ORD002", "destination": "广州",
                            "estimatedDelivery": "2024-04-01", "status": "pending"});
        let created = reg.create_json(Kind::Logistics, fields.as_object().unwrap()).unwrap();
        assert_eq!(created["id"], 1);

        let patch = json!({"status": "delivered", "actualDelivery": "2024-04-02"});
        let updated = reg.update_json(Kind::Logistics, 1, patch.as_object().unwrap()).unwrap();
        assert_eq!(updated["status"], "delivered");
        assert_eq!(updated["destination"], "广州");

        assert_eq!(reg.get_json(Kind::Logistics, 1).unwrap(), updated);
        reg.delete_json(Kind::Logistics, 1).unwrap();
        assert_eq!(reg.get_json(Kind::Logistics, 1).unwrap_err().error_code(), "NOT_FOUND");
    }
}
