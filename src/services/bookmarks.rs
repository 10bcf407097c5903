//! Bookmark endpoints.

use reqwest::Method;

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Bookmark, BookmarkStatus};

pub(crate) fn toggle_path(post_id: &str) -> String {
    format!("/posts/{post_id}/bookmark/")
}

/// `GET /posts/bookmarks/` for the current user.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(api: &ApiClient) -> Result<Vec<Bookmark>, ApiError> {
    api.get_list("/posts/bookmarks/", &[]).await
}

/// Flip the bookmark on a post; the reply says which way it went.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn toggle(api: &ApiClient, post_id: &str) -> Result<BookmarkStatus, ApiError> {
    api.call(Method::POST, &toggle_path(post_id)).await
}
