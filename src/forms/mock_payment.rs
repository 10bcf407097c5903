//! Simulated card payment for a stored donation intent.
//!
//! No gateway is contacted. Any complete set of card fields "succeeds" and
//! records the donation with a `DEMO_<millis>` reference.

#[cfg(test)]
#[path = "mock_payment_test.rs"]
mod mock_payment_test;

use super::donation::PaymentIntent;
use crate::net::api::ApiClient;
use crate::net::types::{Donation, DonationCreate};
use crate::services;
use crate::storage::{self, KeyValueStore, MOCK_PAYMENT_KEY};

pub const PAYMENT_METHOD: &str = "credit_card";

#[derive(Clone, Debug, PartialEq)]
pub struct MockPaymentForm {
    pub intent: PaymentIntent,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
    pub error: Option<String>,
    pub is_success: bool,
}

impl MockPaymentForm {
    /// Read the pending intent; `None` means the page should send the user
    /// back to `/pets`.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        storage::load_json(store, MOCK_PAYMENT_KEY).map(|intent| Self {
            intent,
            card_number: String::new(),
            expiry_date: String::new(),
            cvv: String::new(),
            cardholder_name: String::new(),
            error: None,
            is_success: false,
        })
    }

    pub fn set_card_number(&mut self, raw: &str) {
        self.card_number = format_card_number(raw);
    }

    pub fn set_expiry_date(&mut self, raw: &str) {
        self.expiry_date = format_expiry_date(raw);
    }

    /// # Errors
    ///
    /// Returns "Please fill in all card details" when any card field is empty.
    pub fn validate(&self, reference_id: String) -> Result<DonationCreate, String> {
        let fields = [&self.card_number, &self.expiry_date, &self.cvv, &self.cardholder_name];
        if fields.iter().any(|field| field.is_empty()) {
            return Err("Please fill in all card details".to_owned());
        }
        Ok(DonationCreate {
            amount: self.intent.amount,
            post_id: self.intent.pet_id.clone(),
            payment_method: PAYMENT_METHOD.to_owned(),
            reference_id,
            message: self.intent.message.clone(),
        })
    }

    /// Record the donation and clear the stored intent.
    ///
    /// # Errors
    ///
    /// Returns the validation message, or a fixed message if the backend
    /// rejects the donation. The stored intent survives a failure.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Donation, String> {
        let request = match self.validate(reference_id(super::now_millis())) {
            Ok(request) => request,
            Err(message) => {
                self.error = Some(message.clone());
                return Err(message);
            }
        };
        match services::donations::create(api, &request).await {
            Ok(donation) => {
                if let Err(e) = api.store().remove(MOCK_PAYMENT_KEY) {
                    tracing::warn!(error = %e, "failed to clear payment intent");
                }
                tracing::info!(reference = %request.reference_id, amount = request.amount, "demo donation recorded");
                self.error = None;
                self.is_success = true;
                Ok(donation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create donation");
                let message = "Failed to process donation. Please try again.".to_owned();
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}

#[must_use]
pub fn reference_id(millis: i128) -> String {
    format!("DEMO_{millis}")
}

/// Digits only, at most 16, grouped in fours once there are at least four.
#[must_use]
pub fn format_card_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(16).collect();
    if digits.len() < 4 {
        return digits;
    }
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Digits only, rendered as `MM/YY` once two digits are present.
#[must_use]
pub fn format_expiry_date(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 2 {
        return digits;
    }
    let year: String = digits.chars().skip(2).take(2).collect();
    format!("{}/{year}", &digits[..2])
}
