//! Simulated store checkout.
//!
//! The modal never calls the backend: a successful "payment" produces a
//! locally built confirmed order that the store page can show.

#[cfg(test)]
#[path = "payment_modal_test.rs"]
mod payment_modal_test;

use std::fmt;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::net::types::{OrderStatus, Product, User};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    Card,
    Mobile,
    Bank,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::Card, Self::Mobile, Self::Bank];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Mobile => "mobile",
            Self::Bank => "bank",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order produced by a simulated checkout.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalOrder {
    pub id: String,
    pub product: Product,
    pub user: User,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub shipping_address: String,
    pub phone_number: String,
    pub status: OrderStatus,
    pub created_at: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaymentModal {
    pub product: Product,
    pub payment_method: PaymentMethod,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub card_name: String,
    pub phone_number: String,
    pub shipping_address: String,
}

impl PaymentModal {
    /// Open the modal for `product`. Buying requires a signed-in user.
    ///
    /// # Errors
    ///
    /// Returns "Please login to make a purchase" when `user` is `None`.
    pub fn open(product: &Product, user: Option<&User>) -> Result<Self, String> {
        if user.is_none() {
            return Err("Please login to make a purchase".to_owned());
        }
        Ok(Self { product: product.clone(), ..Self::default() })
    }

    /// Clear every field, as closing the modal does.
    pub fn reset(&mut self) {
        *self = Self { product: self.product.clone(), ..Self::default() };
    }

    /// Shipping address falling back to the user's location, then a placeholder.
    #[must_use]
    pub fn effective_shipping_address(&self, user: &User) -> String {
        [Some(self.shipping_address.as_str()), user.location.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or("Not specified")
            .to_owned()
    }

    /// Complete the simulated payment.
    #[must_use]
    pub fn pay(&self, user: &User) -> LocalOrder {
        let now = OffsetDateTime::now_utc();
        let created_at = now.format(&Rfc3339).unwrap_or_default();
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        tracing::info!(product = %self.product.id, method = %self.payment_method, "simulated purchase");
        LocalOrder {
            id: format!("order_{millis}"),
            product: self.product.clone(),
            user: user.clone(),
            total_amount: self.product.price,
            payment_method: self.payment_method,
            shipping_address: self.effective_shipping_address(user),
            phone_number: self.phone_number.clone(),
            status: OrderStatus::Confirmed,
            created_at,
        }
    }
}
