//! In-kind item listing endpoints.

use reqwest::Method;

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Item, ItemCreate};

pub(crate) fn claim_path(id: &str) -> String {
    format!("/items/{id}/claim/")
}

/// Items still marked `available`, newest first.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(api: &ApiClient) -> Result<Vec<Item>, ApiError> {
    api.get_list("/items/", &[]).await
}

/// # Errors
///
/// Returns an error if the request fails or the backend rejects the item.
pub async fn create(api: &ApiClient, item: &ItemCreate) -> Result<Item, ApiError> {
    api.post_json("/items/create/", item).await
}

/// Mark an item as claimed by the current user.
///
/// # Errors
///
/// Returns an error if the request fails or the item is already claimed.
pub async fn claim(api: &ApiClient, id: &str) -> Result<Item, ApiError> {
    api.call(Method::POST, &claim_path(id)).await
}
