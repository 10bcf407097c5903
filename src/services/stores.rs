//! Store endpoints.

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Store, StoreCreate};

/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(api: &ApiClient) -> Result<Vec<Store>, ApiError> {
    api.get_list("/items/stores/", &[]).await
}

/// # Errors
///
/// Returns an error if the request fails.
pub async fn create(api: &ApiClient, store: &StoreCreate) -> Result<Store, ApiError> {
    api.post_json("/items/stores/create/", store).await
}
