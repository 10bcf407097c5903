//! New blog post form.

#[cfg(test)]
#[path = "blog_create_test.rs"]
mod blog_create_test;

use super::is_blank;
use crate::net::api::ApiClient;
use crate::net::multipart::{Attachment, MultipartPayload};
use crate::net::types::Blog;
use crate::services;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlogCreateForm {
    pub title: String,
    pub content: String,
    /// Comma-separated tags as typed.
    pub tags: String,
    pub image: Option<Attachment>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Split comma-separated input into trimmed, non-empty tags.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()).map(str::to_owned).collect()
}

impl BlogCreateForm {
    /// # Errors
    ///
    /// Returns "Please fill in all required fields" without a title and content.
    pub fn validate(&self) -> Result<MultipartPayload, String> {
        if is_blank(&self.title) || is_blank(&self.content) {
            return Err("Please fill in all required fields".to_owned());
        }
        let mut payload =
            MultipartPayload::new().text("title", self.title.clone()).text("content", self.content.clone());
        if !is_blank(&self.tags) {
            let tags = serde_json::to_string(&parse_tags(&self.tags)).map_err(|e| e.to_string())?;
            payload = payload.text("tags", tags);
        }
        if let Some(image) = &self.image {
            payload = payload.file("image", image.clone());
        }
        Ok(payload)
    }

    /// # Errors
    ///
    /// Returns the validation message or a fixed fallback.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Blog, String> {
        self.success = None;
        let result = match self.validate() {
            Ok(payload) => services::blogs::create(api, payload).await.map_err(|e| {
                tracing::warn!(error = %e, "failed to create blog post");
                "Failed to create blog post. Please try again.".to_owned()
            }),
            Err(message) => Err(message),
        };
        match result {
            Ok(blog) => {
                *self = Self { success: Some("Blog post created successfully!".to_owned()), ..Self::default() };
                Ok(blog)
            }
            Err(message) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}
