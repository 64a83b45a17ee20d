//! Fixture entity shared by the unit tests of this crate.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Reference};
use crate::field::{Field, FieldKind};

pub const PART_STATUSES: &[&str] = &["active", "inactive"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub vendor: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Part {
    const COLLECTION: &'static str = "parts";
    const LABEL: &'static str = "part";
    const FIELDS: &'static [Field] = &[
        Field::new("name", FieldKind::Text { min_len: 1 }, true),
        Field::optional_text("vendor"),
        Field::number("price"),
        Field::new("binId", FieldKind::Integer { min: Some(1), max: None }, false),
        Field::new("received", FieldKind::Date, false),
        Field::status(PART_STATUSES),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "vendor"];

    fn id(&self) -> u64 {
        self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn references(&self) -> Vec<Reference> {
        self.bin_id.map(|b| Reference::new("bins", b)).into_iter().collect()
    }
}

pub fn part(id: u64, name: &str) -> Part {
    Part {
        id,
        name: name.into(),
        vendor: String::new(),
        price: 1.0,
        bin_id: None,
        received: None,
        status: "active".into(),
        created_at: "2024-01-15T00:00:00.000000Z".into(),
        updated_at: "2024-01-15T00:00:00.000000Z".into(),
    }
}
