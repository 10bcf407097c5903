//! Order history for the signed-in user, plus the staff status control.

#[cfg(test)]
#[path = "orders_test.rs"]
mod orders_test;

use crate::net::api::ApiClient;
use crate::net::types::{Order, OrderStatus, User};
use crate::services;

pub const FETCH_ERROR: &str = "Failed to fetch orders";
pub const STAFF_ONLY: &str = "Only staff members can update order status";
pub const UPDATE_ERROR: &str = "Failed to update order status";

#[derive(Clone, Debug, PartialEq)]
pub struct OrdersPage {
    pub orders: Vec<Order>,
    pub status: Option<OrderStatus>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for OrdersPage {
    fn default() -> Self {
        Self { orders: Vec::new(), status: None, is_loading: true, error: None }
    }
}

impl OrdersPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mount(&mut self, api: &ApiClient) {
        self.is_loading = true;
        match services::orders::for_user(api).await {
            Ok(orders) => {
                self.orders = orders;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch orders");
                self.error = Some(FETCH_ERROR.to_owned());
            }
        }
        self.is_loading = false;
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&Order> {
        self.orders.iter().filter(|order| self.status.is_none_or(|status| order.status == status)).collect()
    }

    /// Open orders: anything not yet delivered or cancelled.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.orders
            .iter()
            .filter(|order| !matches!(order.status, OrderStatus::Delivered | OrderStatus::Cancelled))
            .count()
    }

    /// Move an order to `status` and replace the row with the server's copy.
    ///
    /// # Errors
    ///
    /// Returns [`STAFF_ONLY`] without a request for non-staff users, otherwise
    /// the server message or [`UPDATE_ERROR`]; the list is unchanged on failure.
    pub async fn update_status(
        &mut self,
        api: &ApiClient,
        user: Option<&User>,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<&'static str, String> {
        if !user.is_some_and(|user| user.is_staff) {
            return Err(STAFF_ONLY.to_owned());
        }
        let updated = services::orders::update_status(api, order_id, status).await.map_err(|e| {
            tracing::warn!(error = %e, order = %order_id, "failed to update order status");
            e.user_message(UPDATE_ERROR)
        })?;
        match self.orders.iter_mut().find(|order| order.id == order_id) {
            Some(row) => *row = updated,
            None => self.orders.push(updated),
        }
        Ok("Order status updated successfully")
    }
}
