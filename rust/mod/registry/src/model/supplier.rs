use fabdesk_store::{Entity, Field};
use serde::{Deserialize, Serialize};

use super::ActiveStatus;

/// Supplier of glass, profiles, hardware and consumables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: u64,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    /// Business licence number (统一社会信用代码).
    #[serde(default)]
    pub business_license: String,
    #[serde(default)]
    pub tax_number: String,
    pub status: ActiveStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Supplier {
    const COLLECTION: &'static str = "suppliers";
    const LABEL: &'static str = "supplier";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::text("contactPerson"),
        Field::text("phone"),
        Field::optional_text("email"),
        Field::optional_text("address"),
        Field::optional_text("businessLicense"),
        Field::optional_text("taxNumber"),
        Field::status(ActiveStatus::ALL),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "contactPerson", "phone", "address"];

    record_accessors!();

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
