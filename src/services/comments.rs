//! Post comment endpoints.

use reqwest::Method;

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Comment, CommentCreate};

pub(crate) fn list_path(post_id: &str) -> String {
    format!("/posts/{post_id}/comments/")
}

pub(crate) fn create_path(post_id: &str) -> String {
    format!("/posts/{post_id}/comment/")
}

pub(crate) fn delete_path(comment_id: &str) -> String {
    format!("/posts/comments/{comment_id}/delete/")
}

/// # Errors
///
/// Returns an error if the request fails.
pub async fn for_post(api: &ApiClient, post_id: &str) -> Result<Vec<Comment>, ApiError> {
    api.get_list(&list_path(post_id), &[]).await
}

/// # Errors
///
/// Returns an error if the request fails.
pub async fn create(api: &ApiClient, post_id: &str, content: &str) -> Result<Comment, ApiError> {
    let body = CommentCreate { content: content.to_owned() };
    api.post_json(&create_path(post_id), &body).await
}

/// # Errors
///
/// Returns an error if the request fails or the caller does not own the comment.
pub async fn delete(api: &ApiClient, comment_id: &str) -> Result<(), ApiError> {
    api.call_unit(Method::DELETE, &delete_path(comment_id)).await
}
