//! Authentication and profile endpoints.

use reqwest::Method;
use serde::Deserialize;

use crate::net::api::{ApiClient, ApiError};
use crate::net::multipart::{Attachment, MultipartPayload};
use crate::net::types::{AuthResponse, LoginRequest, PasswordChange, ProfileUpdate, User};

/// `POST /auth/login/`.
///
/// # Errors
///
/// Returns an error if the request fails or credentials are rejected.
pub async fn login(api: &ApiClient, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
    api.post_json("/auth/login/", credentials).await
}

/// `POST /auth/register/` with a multipart body (it carries the NID photo).
///
/// # Errors
///
/// Returns an error if the request fails or the backend rejects the data.
pub async fn register(api: &ApiClient, payload: MultipartPayload) -> Result<AuthResponse, ApiError> {
    api.multipart(Method::POST, "/auth/register/", payload).await
}

/// `POST /auth/logout/`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
    api.call_unit(Method::POST, "/auth/logout/").await
}

/// `GET /users/profile/` for the bearer token's owner.
///
/// # Errors
///
/// Returns an error if the request fails or the token is rejected.
pub async fn profile(api: &ApiClient) -> Result<User, ApiError> {
    api.get("/users/profile/", &[]).await
}

/// `PUT /users/profile/update/`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn update_profile(api: &ApiClient, update: &ProfileUpdate) -> Result<User, ApiError> {
    api.put_json("/users/profile/update/", update).await
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MessageReply {
    message: String,
}

/// `POST /users/password/change/`; returns the server's confirmation text.
///
/// # Errors
///
/// Returns an error if the request fails or the old password is wrong.
pub async fn change_password(api: &ApiClient, change: &PasswordChange) -> Result<String, ApiError> {
    let reply: MessageReply = api.post_json("/users/password/change/", change).await?;
    Ok(reply.message)
}

/// `POST /users/upload-photo/` with the image under `photo`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn upload_photo(api: &ApiClient, photo: Attachment) -> Result<User, ApiError> {
    let payload = MultipartPayload::new().file("photo", photo);
    api.multipart(Method::POST, "/users/upload-photo/", payload).await
}
