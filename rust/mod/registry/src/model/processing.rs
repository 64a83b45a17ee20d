use fabdesk_store::{Entity, Field, FieldKind, Reference};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Workshop operation performed on a material.
    ProcessingCategory {
        Cutting => "cutting",
        Drilling => "drilling",
        Welding => "welding",
        Assembly => "assembly",
        Painting => "painting",
        Other => "other",
    }
}

string_enum! {
    ProcessingStatus {
        Pending => "pending",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

/// Quantity of a material put through one workshop operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRecord {
    pub id: u64,
    pub material_id: u64,
    pub material_name: String,
    pub category: ProcessingCategory,
    pub quantity: f64,
    pub unit: String,
    pub processing_date: String,
    pub operator: String,
    #[serde(default)]
    pub remarks: String,
    pub status: ProcessingStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for ProcessingRecord {
    const COLLECTION: &'static str = "processing_records";
    const LABEL: &'static str = "processing record";
    const FIELDS: &'static [Field] = &[
        Field::id_ref("materialId"),
        Field::text("materialName"),
        Field::new("category", FieldKind::Enum(ProcessingCategory::ALL), true),
        Field::new("quantity", FieldKind::Number { min: Some(1.0) }, true),
        Field::text("unit"),
        Field::date("processingDate"),
        Field::new("operator", FieldKind::Text { min_len: 2 }, true),
        Field::optional_text("remarks"),
        Field::status(ProcessingStatus::ALL),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["materialName", "operator", "remarks"];

    record_accessors!();

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("materials", self.material_id)]
    }
}
