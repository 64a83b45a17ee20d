use fabdesk_store::{Entity, Field, FieldKind, Reference};
use serde::{Deserialize, Serialize};

use super::ActiveStatus;

string_enum! {
    /// Which budget a cost line or alert rule belongs to.
    CostKind {
        Labor => "labor",
        Material => "material",
    }
}

/// Planned against actual spend on one project budget line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    pub id: u64,
    pub kind: CostKind,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub planned_cost: f64,
    pub actual_cost: f64,
    pub date: String,
    pub project_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<u64>,
    pub created_at: String,
    pub updated_at: String,
}

impl CostRecord {
    /// Actual spend as a percentage of the plan; `None` without a plan.
    pub fn usage(&self) -> Option<f64> {
        (self.planned_cost > 0.0).then(|| self.actual_cost * 100.0 / self.planned_cost)
    }
}

impl Entity for CostRecord {
    const COLLECTION: &'static str = "cost_records";
    const LABEL: &'static str = "cost record";
    const FIELDS: &'static [Field] = &[
        Field::new("kind", FieldKind::Enum(CostKind::ALL), true),
        Field::text("category"),
        Field::optional_text("description"),
        Field::new("plannedCost", FieldKind::Number { min: Some(0.0) }, true),
        Field::new("actualCost", FieldKind::Number { min: Some(0.0) }, true),
        Field::date("date"),
        Field::id_ref("projectId"),
        Field::new("supplierId", FieldKind::Integer { min: Some(1), max: None }, false),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["category", "description"];

    record_accessors!();

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![Reference::new("projects", self.project_id)];
        if let Some(supplier) = self.supplier_id {
            refs.push(Reference::new("suppliers", supplier));
        }
        refs
    }
}

/// Raise an alert once a budget's usage passes `threshold` percent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertRule {
    pub id: u64,
    pub name: String,
    pub kind: CostKind,
    pub threshold: u8,
    pub status: ActiveStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for AlertRule {
    const COLLECTION: &'static str = "alert_rules";
    const LABEL: &'static str = "alert rule";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::new("kind", FieldKind::Enum(CostKind::ALL), true),
        Field::new("threshold", FieldKind::Integer { min: Some(1), max: Some(100) }, true),
        Field::status(ActiveStatus::ALL),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name"];

    record_accessors!();

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
