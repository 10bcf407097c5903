//! Pet listing endpoints.

use reqwest::Method;
use serde_json::Value;

use crate::net::api::{ApiClient, ApiError, decode_list};
use crate::net::multipart::MultipartPayload;
use crate::net::types::{Paginated, PetSize, Post, PostType, PostUpdate};

/// Server-side filters for `GET /posts/`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub post_type: Option<PostType>,
    pub pet_type: Option<String>,
    pub pet_size: Option<PetSize>,
    pub search: Option<String>,
}

impl PostQuery {
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(post_type) = self.post_type {
            pairs.push(("type", post_type.to_string()));
        }
        if let Some(pet_type) = &self.pet_type {
            pairs.push(("pet_type", pet_type.clone()));
        }
        if let Some(pet_size) = self.pet_size {
            pairs.push(("pet_size", pet_size.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

pub(crate) fn post_path(id: &str) -> String {
    format!("/posts/{id}/")
}

pub(crate) fn edit_path(id: &str) -> String {
    format!("/posts/{id}/edit/")
}

pub(crate) fn update_path(id: &str) -> String {
    format!("/posts/{id}/update/")
}

pub(crate) fn updates_path(id: &str) -> String {
    format!("/posts/{id}/updates/")
}

pub(crate) fn delete_path(id: &str) -> String {
    format!("/posts/{id}/delete/")
}

/// Read a `/posts/` body as a page; a bare array is treated as one full page.
#[must_use]
pub fn page_from_body(body: Value) -> Paginated<Post> {
    match body {
        Value::Array(_) => {
            let data: Vec<Post> = decode_list(body);
            let total = data.len() as u64;
            Paginated { data, total, page: 1, limit: 0, total_pages: 1 }
        }
        Value::Object(mut map) => {
            let data = decode_list(map.remove("data").unwrap_or(Value::Null));
            let number = |key: &str| map.get(key).and_then(Value::as_u64).unwrap_or(0);
            Paginated {
                total: number("total"),
                page: u32::try_from(number("page")).unwrap_or(1).max(1),
                limit: u32::try_from(number("limit")).unwrap_or(0),
                total_pages: u32::try_from(number("total_pages")).unwrap_or(0),
                data,
            }
        }
        _ => Paginated::default(),
    }
}

/// `GET /posts/` with filters.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(api: &ApiClient, query: &PostQuery) -> Result<Paginated<Post>, ApiError> {
    let body = api.get_value("/posts/", &query.to_pairs()).await?;
    Ok(page_from_body(body))
}

/// Newest `limit` posts, for the dashboard.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn recent(api: &ApiClient, limit: u32) -> Result<Vec<Post>, ApiError> {
    let query = PostQuery { limit: Some(limit), ..PostQuery::default() };
    Ok(list(api, &query).await?.data)
}

/// `GET /posts/{id}/` as raw JSON, so callers can reject malformed shapes.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn get_value(api: &ApiClient, id: &str) -> Result<Value, ApiError> {
    api.get_value(&post_path(id), &[]).await
}

/// `POST /posts/create/` (multipart with `images` parts).
///
/// # Errors
///
/// Returns an error if the request fails or the backend rejects the post.
pub async fn create(api: &ApiClient, payload: MultipartPayload) -> Result<Post, ApiError> {
    api.multipart(Method::POST, "/posts/create/", payload).await
}

/// `PUT /posts/{id}/edit/` (multipart).
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn edit(api: &ApiClient, id: &str, payload: MultipartPayload) -> Result<Post, ApiError> {
    api.multipart(Method::PUT, &edit_path(id), payload).await
}

/// `POST /posts/{id}/update/`: attach a progress update.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn add_update(api: &ApiClient, id: &str, payload: MultipartPayload) -> Result<PostUpdate, ApiError> {
    api.multipart(Method::POST, &update_path(id), payload).await
}

/// `GET /posts/{id}/updates/`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn updates(api: &ApiClient, id: &str) -> Result<Vec<PostUpdate>, ApiError> {
    api.get_list(&updates_path(id), &[]).await
}

/// `DELETE /posts/{id}/delete/`; the backend allows the owner or staff.
///
/// # Errors
///
/// Returns an error if the request fails or the caller may not delete the post.
pub async fn delete(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.call_unit(Method::DELETE, &delete_path(id)).await
}
