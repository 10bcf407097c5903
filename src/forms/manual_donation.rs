//! Bank-transfer donation backed by an uploaded receipt.

#[cfg(test)]
#[path = "manual_donation_test.rs"]
mod manual_donation_test;

use crate::net::api::ApiClient;
use crate::net::multipart::{Attachment, MultipartPayload, validate_image};
use crate::net::types::Donation;
use crate::services;
use crate::util::format::parse_amount;

pub const SUCCESS_MESSAGE: &str = "Manual donation submitted successfully! It will be reviewed by an admin.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManualDonationForm {
    pub post_id: String,
    pub amount: String,
    pub message: String,
    pub receipt: Option<Attachment>,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl ManualDonationForm {
    #[must_use]
    pub fn new(post_id: impl Into<String>) -> Self {
        Self { post_id: post_id.into(), ..Self::default() }
    }

    /// Accept a receipt file if it is an image under 5 MB.
    ///
    /// # Errors
    ///
    /// Returns the rejection message; the previous receipt is kept.
    pub fn select_receipt(&mut self, file: Attachment) -> Result<(), String> {
        match validate_image(&file, "Receipt image must be less than 5MB", "Please upload a valid image file") {
            Ok(()) => {
                self.receipt = Some(file);
                self.error = None;
                Ok(())
            }
            Err(message) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    pub fn remove_receipt(&mut self) {
        self.receipt = None;
    }

    /// # Errors
    ///
    /// Returns the message to show when the amount or receipt is invalid.
    pub fn validate(&self) -> Result<MultipartPayload, String> {
        if parse_amount(&self.amount).is_none_or(|amount| amount <= 0.0) {
            return Err("Please enter a valid donation amount".to_owned());
        }
        let Some(receipt) = &self.receipt else {
            return Err("Please upload a receipt image".to_owned());
        };
        Ok(MultipartPayload::new()
            .text("post_id", self.post_id.clone())
            .text("amount", self.amount.trim())
            .text("message", self.message.clone())
            .file("receipt_image", receipt.clone()))
    }

    /// Submit the receipt; the resulting donation is `pending` until reviewed.
    ///
    /// # Errors
    ///
    /// Returns the validation message, the server's message, or a fixed
    /// fallback.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Donation, String> {
        self.success = None;
        let payload = match self.validate() {
            Ok(payload) => payload,
            Err(message) => {
                self.error = Some(message.clone());
                return Err(message);
            }
        };
        match services::donations::create_manual(api, payload).await {
            Ok(donation) => {
                tracing::info!(donation = %donation.id, "manual donation submitted");
                *self = Self { success: Some(SUCCESS_MESSAGE.to_owned()), ..Self::new(self.post_id.clone()) };
                Ok(donation)
            }
            Err(e) => {
                let message = e.user_message("Failed to submit donation. Please try again.");
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}
