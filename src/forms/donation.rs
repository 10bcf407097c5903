//! Online donation form.
//!
//! DESIGN
//! ======
//! Submitting does not call the backend. The validated intent is written to
//! storage under `mockPaymentData` and the caller moves on to the mock
//! payment page, which reads it back and records the donation.

#[cfg(test)]
#[path = "donation_test.rs"]
mod donation_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{Post, User};
use crate::storage::{self, KeyValueStore, MOCK_PAYMENT_KEY};
use crate::util::format::{format_plain_number, parse_amount, progress_percent};

/// Largest amount offered as a suggestion.
pub const SUGGESTED_CAP: f64 = 50.0;

/// A validated donation awaiting mock payment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub amount: f64,
    pub pet_id: String,
    pub pet_name: String,
    pub user_id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DonationForm {
    pub post_id: String,
    pub post_title: String,
    pub donation_goal: Option<f64>,
    pub current_amount: f64,
    pub user_id: String,
    pub amount: String,
    pub message: String,
    pub error: Option<String>,
}

impl DonationForm {
    #[must_use]
    pub fn for_post(post: &Post, user: &User) -> Self {
        Self {
            post_id: post.id.clone(),
            post_title: post.title.clone(),
            donation_goal: post.donation_goal,
            current_amount: post.current_amount,
            user_id: user.id.clone(),
            ..Self::default()
        }
    }

    fn goal(&self) -> Option<f64> {
        self.donation_goal.filter(|goal| *goal > 0.0)
    }

    /// Amount left before the goal is met; zero when there is no goal.
    #[must_use]
    pub fn remaining_amount(&self) -> f64 {
        self.goal().map_or(0.0, |goal| goal - self.current_amount)
    }

    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.goal().map_or(0.0, |goal| progress_percent(self.current_amount, goal))
    }

    #[must_use]
    pub fn suggested_amount(&self) -> f64 {
        self.remaining_amount().min(SUGGESTED_CAP)
    }

    /// # Errors
    ///
    /// Returns the message to show when the amount is missing, not positive,
    /// or larger than what remains of the goal.
    pub fn validate(&self) -> Result<PaymentIntent, String> {
        if self.amount.is_empty() {
            return Err("Please fill in all required fields".to_owned());
        }
        let amount = parse_amount(&self.amount)
            .filter(|amount| *amount > 0.0)
            .ok_or_else(|| "Please enter a valid amount".to_owned())?;
        if let Some(goal) = self.goal() {
            if self.current_amount + amount > goal {
                return Err(format!(
                    "Donation amount exceeds the goal. Maximum remaining: ${}",
                    format_plain_number(goal - self.current_amount)
                ));
            }
        }
        Ok(PaymentIntent {
            amount,
            pet_id: self.post_id.clone(),
            pet_name: self.post_title.clone(),
            user_id: self.user_id.clone(),
            message: self.message.clone(),
        })
    }

    /// Validate and hand the intent to the mock payment page via storage.
    ///
    /// # Errors
    ///
    /// Returns the validation message, or a fixed message if storage fails.
    pub fn submit(&mut self, store: &dyn KeyValueStore) -> Result<PaymentIntent, String> {
        let result = self.validate().and_then(|intent| {
            storage::save_json(store, MOCK_PAYMENT_KEY, &intent).map_err(|e| {
                tracing::warn!(error = %e, "failed to store payment intent");
                "Failed to proceed to payment. Please try again.".to_owned()
            })?;
            Ok(intent)
        });
        self.error = result.as_ref().err().cloned();
        result
    }
}
