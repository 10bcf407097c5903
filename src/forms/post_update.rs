//! Progress update form for an existing post.

#[cfg(test)]
#[path = "post_update_test.rs"]
mod post_update_test;

use super::is_blank;
use crate::net::api::ApiClient;
use crate::net::multipart::{Attachment, MultipartPayload};
use crate::services;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostUpdateForm {
    pub post_id: String,
    pub update_text: String,
    pub new_images: Vec<Attachment>,
    pub error: Option<String>,
}

impl PostUpdateForm {
    #[must_use]
    pub fn new(post_id: impl Into<String>) -> Self {
        Self { post_id: post_id.into(), ..Self::default() }
    }

    /// # Errors
    ///
    /// Returns a message when there is neither text nor an image.
    pub fn validate(&self) -> Result<MultipartPayload, String> {
        if is_blank(&self.update_text) && self.new_images.is_empty() {
            return Err("Please provide update text or upload new images".to_owned());
        }
        let mut payload = MultipartPayload::new().text("update_text", self.update_text.clone());
        for image in &self.new_images {
            payload = payload.file("new_images", image.clone());
        }
        Ok(payload)
    }

    /// # Errors
    ///
    /// Returns the validation message, the server's message, or a fixed fallback.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), String> {
        let result = match self.validate() {
            Ok(payload) => services::posts::add_update(api, &self.post_id, payload)
                .await
                .map(drop)
                .map_err(|e| e.user_message("Failed to update post. Please try again.")),
            Err(message) => Err(message),
        };
        match result {
            Ok(()) => {
                *self = Self::new(self.post_id.clone());
                Ok(())
            }
            Err(message) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}
