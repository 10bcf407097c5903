//! Badge endpoints.

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::Badge;

pub(crate) fn user_badges_path(user_id: &str) -> String {
    format!("/badges/user/{user_id}/")
}

/// # Errors
///
/// Returns an error if the request fails.
pub async fn for_user(api: &ApiClient, user_id: &str) -> Result<Vec<Badge>, ApiError> {
    api.get_list(&user_badges_path(user_id), &[]).await
}
