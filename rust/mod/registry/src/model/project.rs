use fabdesk_store::{Entity, Field, FieldKind, Reference};
use serde::{Deserialize, Serialize};

string_enum! {
    ProjectStatus {
        Planning => "planning",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

/// A contracted installation project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub customer_id: u64,
    pub contract_amount: f64,
    pub start_date: String,
    pub end_date: String,
    /// Percent complete, 0 to 100.
    #[serde(default)]
    pub progress: u8,
    pub status: ProjectStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Project {
    const COLLECTION: &'static str = "projects";
    const LABEL: &'static str = "project";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::id_ref("customerId"),
        Field::new("contractAmount", FieldKind::Number { min: Some(0.0) }, true),
        Field::date("startDate"),
        Field::date("endDate"),
        Field::percent("progress"),
        Field::status(ProjectStatus::ALL),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name"];

    record_accessors!();

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("customers", self.customer_id)]
    }
}

/// A bar on a project's Gantt chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTask {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub progress: u8,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for ScheduleTask {
    const COLLECTION: &'static str = "schedule_tasks";
    const LABEL: &'static str = "schedule task";
    const FIELDS: &'static [Field] = &[
        Field::id_ref("projectId"),
        Field::text("name"),
        Field::date("start"),
        Field::date("end"),
        Field::percent("progress"),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name"];

    record_accessors!();

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("projects", self.project_id)]
    }
}
