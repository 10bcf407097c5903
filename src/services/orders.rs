//! Store order endpoints.

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Order, OrderStatus, OrderStatusUpdate};

pub(crate) fn status_path(order_id: &str) -> String {
    format!("/items/orders/{order_id}/status/")
}

/// Orders placed by the current user.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn for_user(api: &ApiClient) -> Result<Vec<Order>, ApiError> {
    api.get_list("/items/orders/", &[]).await
}

/// Staff-only status change.
///
/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn update_status(api: &ApiClient, order_id: &str, status: OrderStatus) -> Result<Order, ApiError> {
    api.put_json(&status_path(order_id), &OrderStatusUpdate { status }).await
}
