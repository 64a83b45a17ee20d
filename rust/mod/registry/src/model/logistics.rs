use fabdesk_store::{Entity, Field, FieldKind};
use serde::{Deserialize, Serialize};

string_enum! {
    LogisticsStatus {
        Pending => "pending",
        InTransit => "in_transit",
        Delivered => "delivered",
        Exception => "exception",
    }
}

/// Freight tracking for an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsRecord {
    pub id: u64,
    pub order_number: String,
    pub destination: String,
    pub estimated_delivery: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery: Option<String>,
    pub status: LogisticsStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for LogisticsRecord {
    const COLLECTION: &'static str = "logistics";
    const LABEL: &'static str = "logistics record";
    const FIELDS: &'static [Field] = &[
        Field::text("orderNumber"),
        Field::text("destination"),
        Field::date("estimatedDelivery"),
        Field::new("actualDelivery", FieldKind::Date, false),
        Field::status(LogisticsStatus::ALL),
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["orderNumber", "destination"];

    record_accessors!();

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
