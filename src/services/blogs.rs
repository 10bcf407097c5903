//! Blog endpoints.

use reqwest::Method;

use crate::net::api::{ApiClient, ApiError};
use crate::net::multipart::MultipartPayload;
use crate::net::types::Blog;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlogQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl BlogQuery {
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(api: &ApiClient, query: &BlogQuery) -> Result<Vec<Blog>, ApiError> {
    api.get_list("/blogs/", &query.to_pairs()).await
}

/// `POST /blogs/create/` with `title`, `content`, `tags` (JSON array text)
/// and an optional `image`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn create(api: &ApiClient, payload: MultipartPayload) -> Result<Blog, ApiError> {
    api.multipart(Method::POST, "/blogs/create/", payload).await
}
