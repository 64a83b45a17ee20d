use fabdesk_store::{Entity, Field, FieldKind, Reference};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Catalogue grouping of a material.
    MaterialType {
        Profile => "profile",
        Glass => "glass",
        Hardware => "hardware",
        Auxiliary => "auxiliary",
    }
}

/// A catalogue material and its current unit price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: u64,
    pub name: String,
    pub material_type: MaterialType,
    pub specification: String,
    pub unit: String,
    pub price: f64,
    pub supplier_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Material {
    const COLLECTION: &'static str = "materials";
    const LABEL: &'static str = "material";
    const FIELDS: &'static [Field] = &[
        Field::new("name", FieldKind::Text { min_len: 2 }, true),
        Field::new("materialType", FieldKind::Enum(MaterialType::ALL), true),
        Field::text("specification"),
        Field::text("unit"),
        Field::new("price", FieldKind::Number { min: Some(0.01) }, true),
        Field::id_ref("supplierId"),
        Field::optional_text("imageUrl"),
        Field::optional_text("description"),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "specification", "description"];

    record_accessors!();

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("suppliers", self.supplier_id)]
    }
}

/// A supplier's quoted price for a material over a validity window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPrice {
    pub id: u64,
    pub supplier_id: u64,
    pub material_name: String,
    pub specification: String,
    pub unit: String,
    pub price: f64,
    pub effective_date: String,
    pub expiry_date: String,
    #[serde(default)]
    pub remark: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for MaterialPrice {
    const COLLECTION: &'static str = "material_prices";
    const LABEL: &'static str = "material price";
    const FIELDS: &'static [Field] = &[
        Field::id_ref("supplierId"),
        Field::text("materialName"),
        Field::text("specification"),
        Field::text("unit"),
        Field::new("price", FieldKind::Number { min: Some(0.0) }, true),
        Field::date("effectiveDate"),
        Field::date("expiryDate"),
        Field::optional_text("remark"),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["materialName", "specification", "remark"];

    record_accessors!();

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("suppliers", self.supplier_id)]
    }
}
