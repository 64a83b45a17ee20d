use fabdesk_store::{Entity, Field, FieldKind};
use serde::{Deserialize, Serialize};

use super::ActiveStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub position: String,
    pub department: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Monthly salary, CNY.
    pub salary: f64,
    pub hire_date: String,
    pub status: ActiveStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Employee {
    const COLLECTION: &'static str = "employees";
    const LABEL: &'static str = "employee";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::text("position"),
        Field::text("department"),
        Field::text("phone"),
        Field::optional_text("email"),
        Field::new("salary", FieldKind::Number { min: Some(0.0) }, true),
        Field::date("hireDate"),
        Field::status(ActiveStatus::ALL),
    ];
    const SEARCH_FIELDS: &'static [&'static str] =
        &["name", "position", "department", "phone", "email"];

    record_accessors!();

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
