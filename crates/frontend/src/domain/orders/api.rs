use contracts::domain::orders::{Order, OrderStatus, OrdersListResponse, StatusUpdateRequest};
use serde_json::Value;

use crate::shared::api_client::{get_json, patch_json, ApiError};

pub async fn fetch_orders() -> Result<OrdersListResponse, ApiError> {
    get_json("/orders/admin/all", true).await
}

/// Order analytics for the metric strip. The payload shape is owned by the
/// server; it is consumed through the metric binding table, so it stays
/// untyped here.
pub async fn fetch_analytics() -> Result<Value, ApiError> {
    get_json("/orders/admin/analytics", true).await
}

pub async fn fetch_order(order_id: i64) -> Result<Order, ApiError> {
    get_json(&format!("/orders/{}", order_id), true).await
}

pub async fn update_status(order_id: i64, status: OrderStatus) -> Result<Value, ApiError> {
    patch_json(
        &format!("/orders/{}/status", order_id),
        &StatusUpdateRequest { status },
        true,
    )
    .await
}
