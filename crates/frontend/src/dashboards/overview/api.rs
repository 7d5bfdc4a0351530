use serde_json::Value;

use crate::shared::api_client::{get_json, ApiError};

/// Dashboard overview payload: a nested bag of metrics plus the
/// `recent_orders` collection. Metrics go through the binding table, so
/// the payload stays untyped here.
pub async fn fetch_overview() -> Result<Value, ApiError> {
    get_json("/admin/dashboard/overview", true).await
}
