//! Volunteer pickup requests for donated supplies.

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{VolunteerDonation, VolunteerDonationCreate};

/// `POST /items/volunteer-donations/create/`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn create(api: &ApiClient, request: &VolunteerDonationCreate) -> Result<VolunteerDonation, ApiError> {
    api.post_json("/items/volunteer-donations/create/", request).await
}
