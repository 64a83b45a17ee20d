use fabdesk_store::{Entity, Field, Reference};
use serde::{Deserialize, Serialize};

string_enum! {
    TransactionStatus {
        Completed => "completed",
        Pending => "pending",
        Cancelled => "cancelled",
    }
}

/// A customer order and its contract amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub customer_id: u64,
    pub order_number: String,
    pub amount: f64,
    pub date: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Transaction {
    const COLLECTION: &'static str = "transactions";
    const LABEL: &'static str = "transaction";
    const FIELDS: &'static [Field] = &[
        Field::id_ref("customerId"),
        Field::text("orderNumber"),
        Field::number("amount"),
        Field::date("date"),
        Field::status(TransactionStatus::ALL),
        Field::optional_text("description"),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["orderNumber", "description"];

    record_accessors!();

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("customers", self.customer_id)]
    }
}
