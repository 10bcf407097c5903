//! Product endpoints.

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Product, ProductCreate};

pub(crate) fn create_path(store_id: &str) -> String {
    format!("/items/stores/{store_id}/products/create/")
}

/// Every active product across stores.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(api: &ApiClient) -> Result<Vec<Product>, ApiError> {
    api.get_list("/items/products/", &[]).await
}

/// # Errors
///
/// Returns an error if the request fails or the caller does not own the store.
pub async fn create(api: &ApiClient, store_id: &str, product: &ProductCreate) -> Result<Product, ApiError> {
    api.post_json(&create_path(store_id), product).await
}
