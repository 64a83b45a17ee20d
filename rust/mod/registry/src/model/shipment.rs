use fabdesk_store::{Entity, Field, FieldKind, Reference};
use serde::{Deserialize, Serialize};

string_enum! {
    ShipmentStatus {
        Pending => "pending",
        Shipped => "shipped",
        Delivered => "delivered",
    }
}

/// One line of a shipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentItem {
    pub material_id: u64,
    pub quantity: f64,
    pub unit: String,
}

/// Outbound delivery of materials to a customer site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: u64,
    pub order_number: String,
    pub customer_id: u64,
    #[serde(default)]
    pub items: Vec<ShipmentItem>,
    /// Sum of item quantities. Recomputed on every commit.
    #[serde(default)]
    pub total_quantity: f64,
    pub status: ShipmentStatus,
    #[serde(default)]
    pub tracking_number: String,
    pub delivery_address: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Shipment {
    const COLLECTION: &'static str = "shipments";
    const LABEL: &'static str = "shipment";
    const FIELDS: &'static [Field] = &[
        Field::text("orderNumber"),
        Field::id_ref("customerId"),
        Field::new("items", FieldKind::Json, false),
        Field::status(ShipmentStatus::ALL),
        Field::optional_text("trackingNumber"),
        Field::text("deliveryAddress"),
        Field::text("contactPerson"),
        Field::text("contactPhone"),
    ];
    const SEARCH_FIELDS: &'static [&'static str] =
        &["orderNumber", "trackingNumber", "deliveryAddress", "contactPerson"];

    record_accessors!();

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![Reference::new("customers", self.customer_id)];
        refs.extend(self.items.iter().map(|i| Reference::new("materials", i.material_id)));
        refs
    }

    fn normalize(&mut self) {
        self.total_quantity = self.items.iter().map(|i| i.quantity).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_sums_items_and_refs_cover_materials() {
        let mut s: Shipment = serde_json::from_value(serde_json::json!({
            "id": 1, "orderNumber": "CK20240115001", "customerId": 1,
            "items": [
                {"materialId": 1, "quantity": 100, "unit": "米"},
                {"materialId": 3, "quantity": 20.5, "unit": "套"}
            ],
            "totalQuantity": 7,
            "status": "shipped", "deliveryAddress": "北京市朝阳区",
            "contactPerson": "张经理", "contactPhone": "13800138000",
            "createdAt": "2024-01-15", "updatedAt": "2024-01-15"
        }))
        .unwrap();
        s.normalize();
        assert_eq!(s.total_quantity, 120.5);
        assert_eq!(
            s.references(),
            vec![
                Reference::new("customers", 1),
                Reference::new("materials", 1),
                Reference::new("materials", 3),
            ]
        );
    }
}
