use fabdesk_store::{Entity, Field};
use serde::{Deserialize, Serialize};

use super::ActiveStatus;

/// A buyer of curtain-wall, window and glass work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub status: ActiveStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Customer {
    const COLLECTION: &'static str = "customers";
    const LABEL: &'static str = "customer";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::text("contactPerson"),
        Field::text("phone"),
        Field::optional_text("email"),
        Field::optional_text("address"),
        Field::status(ActiveStatus::ALL),
    ];
    const SEARCH_FIELDS: &'static [&'static str] =
        &["name", "contactPerson", "phone", "email", "address"];

    record_accessors!();

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_is_camel_case() {
        let c: Customer = serde_json::from_str(
            r#"{"id":1,"name":"华润置地","contactPerson":"张经理","phone":"13800138000",
                "status":"active","createdAt":"2024-01-15","updatedAt":"2024-01-15"}"#,
        )
        .unwrap();
        assert_eq!(c.contact_person, "张经理");
        assert_eq!(c.email, "");
        assert_eq!(c.status, ActiveStatus::Active);

        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["contactPerson"], "张经理");
        assert_eq!(v["status"], "active");
    }
}
