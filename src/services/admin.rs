//! Staff-only moderation endpoints under `/users/admin/`.

use reqwest::Method;

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Comment, Post, User};

pub(crate) fn user_path(user_id: &str) -> String {
    format!("/users/admin/users/{user_id}/")
}

pub(crate) fn toggle_user_path(user_id: &str) -> String {
    format!("/users/admin/users/{user_id}/toggle-status/")
}

pub(crate) fn post_path(post_id: &str) -> String {
    format!("/users/admin/posts/{post_id}/")
}

pub(crate) fn comment_path(comment_id: &str) -> String {
    format!("/users/admin/comments/{comment_id}/")
}

/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn users(api: &ApiClient) -> Result<Vec<User>, ApiError> {
    api.get_list("/users/admin/users/", &[]).await
}

/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn delete_user(api: &ApiClient, user_id: &str) -> Result<(), ApiError> {
    api.call_unit(Method::DELETE, &user_path(user_id)).await
}

/// Flip a user's `is_active` flag; returns the updated user.
///
/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn toggle_user_status(api: &ApiClient, user_id: &str) -> Result<User, ApiError> {
    api.call(Method::PUT, &toggle_user_path(user_id)).await
}

/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn posts(api: &ApiClient) -> Result<Vec<Post>, ApiError> {
    api.get_list("/users/admin/posts/", &[]).await
}

/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn delete_post(api: &ApiClient, post_id: &str) -> Result<(), ApiError> {
    api.call_unit(Method::DELETE, &post_path(post_id)).await
}

/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn comments(api: &ApiClient) -> Result<Vec<Comment>, ApiError> {
    api.get_list("/users/admin/comments/", &[]).await
}

/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn delete_comment(api: &ApiClient, comment_id: &str) -> Result<(), ApiError> {
    api.call_unit(Method::DELETE, &comment_path(comment_id)).await
}
