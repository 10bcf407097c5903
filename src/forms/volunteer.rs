//! Volunteer pickup request for donated supplies.

#[cfg(test)]
#[path = "volunteer_test.rs"]
mod volunteer_test;

use super::is_blank;
use crate::net::api::ApiClient;
use crate::net::types::{VolunteerDonation, VolunteerDonationCreate, VolunteerItemType};
use crate::services;

pub const SUCCESS_MESSAGE: &str =
    "Your donation request has been submitted successfully! A volunteer will contact you soon to arrange pickup.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VolunteerDonationForm {
    pub item_type: Option<VolunteerItemType>,
    pub description: String,
    pub quantity: String,
    pub estimated_value: String,
    pub pickup_location: String,
    pub contact_number: String,
    pub available_times: String,
    pub special_instructions: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display label for each item type option.
#[must_use]
pub fn item_type_label(item_type: VolunteerItemType) -> &'static str {
    match item_type {
        VolunteerItemType::Food => "Pet Food",
        VolunteerItemType::Toys => "Pet Toys",
        VolunteerItemType::Accessories => "Pet Accessories",
        VolunteerItemType::Mixed => "Mixed Items",
    }
}

impl VolunteerDonationForm {
    /// # Errors
    ///
    /// Returns "Please fill in all required fields" when item type,
    /// description, pickup location or contact number is missing.
    pub fn validate(&self) -> Result<VolunteerDonationCreate, String> {
        let Some(item_type) = self.item_type else {
            return Err("Please fill in all required fields".to_owned());
        };
        if is_blank(&self.description) || is_blank(&self.pickup_location) || is_blank(&self.contact_number) {
            return Err("Please fill in all required fields".to_owned());
        }
        Ok(VolunteerDonationCreate {
            item_type: item_type.as_str().to_owned(),
            description: self.description.clone(),
            quantity: self.quantity.clone(),
            estimated_value: self.estimated_value.clone(),
            pickup_location: self.pickup_location.clone(),
            contact_number: self.contact_number.clone(),
            available_times: self.available_times.clone(),
            special_instructions: self.special_instructions.clone(),
        })
    }

    /// # Errors
    ///
    /// Returns the validation message, the server's message, or a fixed fallback.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<VolunteerDonation, String> {
        self.success = None;
        let result = match self.validate() {
            Ok(request) => services::volunteer::create(api, &request)
                .await
                .map_err(|e| e.user_message("Failed to submit donation request. Please try again.")),
            Err(message) => Err(message),
        };
        match result {
            Ok(donation) => {
                *self = Self { success: Some(SUCCESS_MESSAGE.to_owned()), ..Self::default() };
                Ok(donation)
            }
            Err(message) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}
