use serde::{Deserialize, Serialize};

use crate::domain::common::flexible_f64;

/// Closed set of order lifecycle states understood by the commerce API.
///
/// The API accepts and returns the exact capitalized names, so the enum
/// serializes verbatim. Orders are never created or deleted from the admin
/// panel; the only mutation is a status change through
/// `PATCH /orders/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Every valid status, in the order the status dropdown presents them.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<OrderStatus> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCustomer {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl OrderCustomer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_name: String,
    #[serde(default)]
    pub sku: String,
    pub quantity: u32,
    #[serde(deserialize_with = "flexible_f64")]
    pub unit_price: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub order_number: String,
    pub created_at: String,
    #[serde(deserialize_with = "flexible_f64")]
    pub total_amount: f64,
    pub customer: OrderCustomer,
    pub shipping_address: String,
    #[serde(default)]
    pub billing_address: String,
    pub payment_method: String,
    #[serde(default)]
    pub payment_status: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub shipping_amount: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub tax_amount: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub discount_amount: f64,
}

/// Body of `GET /orders/admin/all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersListResponse {
    pub orders: Vec<Order>,
}

/// Body of `PATCH /orders/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(OrderStatus::from_str("Shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::from_str("shipped"), None);
        assert_eq!(OrderStatus::from_str(""), None);
    }

    #[test]
    fn test_order_deserializes_string_amounts() {
        let json = r#"{
            "order_id": 41,
            "order_number": "ORD-0041",
            "created_at": "2025-03-02T10:15:00.000Z",
            "total_amount": "1499.00",
            "customer": {"first_name": "Asha", "last_name": "Rao", "email": "asha@example.com", "phone": null},
            "shipping_address": "12 Lake View, Pune",
            "billing_address": "12 Lake View, Pune",
            "payment_method": "UPI",
            "payment_status": "Paid",
            "status": "Confirmed",
            "items": [
                {"product_name": "Seed Mix", "sku": "SM", "quantity": 2, "unit_price": "700.00", "total_price": "1400.00"}
            ],
            "shipping_amount": 99,
            "tax_amount": 0,
            "discount_amount": 0
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.total_amount, 1499.0);
        assert_eq!(order.items[0].total_price, 1400.0);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.customer.full_name(), "Asha Rao");
    }

    #[test]
    fn test_status_update_body() {
        let body = StatusUpdateRequest {
            status: OrderStatus::Refunded,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"Refunded"}"#
        );
    }
}
