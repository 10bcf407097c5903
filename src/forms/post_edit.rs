//! Owner-side edit form for an existing post.

#[cfg(test)]
#[path = "post_edit_test.rs"]
mod post_edit_test;

use super::is_blank;
use crate::net::api::ApiClient;
use crate::net::multipart::{Attachment, MultipartPayload, validate_image};
use crate::net::types::{Post, PostImage, PostType};
use crate::services;
use crate::util::format::{format_plain_number, parse_amount};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostEditForm {
    pub post_id: String,
    pub title: String,
    pub description: String,
    pub post_type: PostType,
    pub donation_goal: String,
    pub pet_age: String,
    pub pet_breed: String,
    pub pet_gender: String,
    pub location: String,
    pub contact_info: String,
    pub special_requirements: String,
    pub existing_images: Vec<PostImage>,
    pub new_images: Vec<Attachment>,
    pub error: Option<String>,
}

impl PostEditForm {
    #[must_use]
    pub fn from_post(post: &Post) -> Self {
        Self {
            post_id: post.id.clone(),
            title: post.title.clone(),
            description: post.description.clone().unwrap_or_default(),
            post_type: post.post_type,
            donation_goal: post.donation_goal.map(format_plain_number).unwrap_or_default(),
            pet_age: post.pet_age.map(|age| age.to_string()).unwrap_or_default(),
            existing_images: post.images.clone(),
            ..Self::default()
        }
    }

    /// Keep the images under 5 MB; report the last rejection, if any.
    pub fn add_images(&mut self, files: impl IntoIterator<Item = Attachment>) -> Option<String> {
        let mut rejection = None;
        for file in files {
            match validate_image(&file, "Each image must be less than 5MB", "Please upload valid image files") {
                Ok(()) => self.new_images.push(file),
                Err(message) => rejection = Some(message),
            }
        }
        self.error.clone_from(&rejection);
        rejection
    }

    pub fn remove_new_image(&mut self, index: usize) {
        if index < self.new_images.len() {
            self.new_images.remove(index);
        }
    }

    pub fn remove_existing_image(&mut self, index: usize) {
        if index < self.existing_images.len() {
            self.existing_images.remove(index);
        }
    }

    /// # Errors
    ///
    /// Returns the message to show when title, description or a donation
    /// post's goal is missing.
    pub fn validate(&self) -> Result<MultipartPayload, String> {
        if is_blank(&self.title) || is_blank(&self.description) {
            return Err("Title and description are required".to_owned());
        }
        if self.post_type == PostType::Donation
            && parse_amount(&self.donation_goal).is_none_or(|goal| goal <= 0.0)
        {
            return Err("Donation goal is required for donation posts".to_owned());
        }

        let fields = [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("type", self.post_type.as_str()),
            ("donation_goal", self.donation_goal.as_str()),
            ("pet_age", self.pet_age.as_str()),
            ("pet_breed", self.pet_breed.as_str()),
            ("pet_gender", self.pet_gender.as_str()),
            ("location", self.location.as_str()),
            ("contact_info", self.contact_info.as_str()),
            ("special_requirements", self.special_requirements.as_str()),
        ];
        let mut payload = MultipartPayload::new();
        for (name, value) in fields {
            if !value.is_empty() {
                payload = payload.text(name, value);
            }
        }
        for image in &self.new_images {
            payload = payload.file("new_images", image.clone());
        }
        let kept: Vec<&str> = self
            .existing_images
            .iter()
            .map(|image| if image.id.is_empty() { image.image_url.as_str() } else { image.id.as_str() })
            .collect();
        let kept = serde_json::to_string(&kept).map_err(|e| e.to_string())?;
        Ok(payload.text("existing_images", kept))
    }

    /// # Errors
    ///
    /// Returns the validation message, the server's message, or a fixed fallback.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Post, String> {
        let result = match self.validate() {
            Ok(payload) => services::posts::edit(api, &self.post_id, payload)
                .await
                .map_err(|e| e.user_message("Failed to update post. Please try again.")),
            Err(message) => Err(message),
        };
        self.error = result.as_ref().err().cloned();
        result
    }
}
