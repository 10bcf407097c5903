//! Three-step pet listing wizard.
//!
//! DESIGN
//! ======
//! Steps are strictly linear. `advance` validates the current step and only
//! then moves forward; `back` never validates. Submitting is only possible
//! from the photos step and keeps the wizard where it is on failure so the
//! user can retry without re-entering anything.

#[cfg(test)]
#[path = "post_wizard_test.rs"]
mod post_wizard_test;

use super::is_blank;
use crate::net::api::ApiClient;
use crate::net::multipart::{Attachment, MultipartPayload};
use crate::net::types::{PetSize, Post, PostType};
use crate::services;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    Basics,
    Details,
    Photos,
}

impl WizardStep {
    /// 1-based position shown as "Step N of 3".
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Basics => 1,
            Self::Details => 2,
            Self::Photos => 3,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Basics => "Basic Information",
            Self::Details => "Pet Details",
            Self::Photos => "Photos & Review",
        }
    }

    /// Progress bar fill for this step.
    #[must_use]
    pub fn progress_percent(self) -> f64 {
        f64::from(self.number()) / 3.0 * 100.0
    }

    fn next(self) -> Self {
        match self {
            Self::Basics => Self::Details,
            Self::Details | Self::Photos => Self::Photos,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Basics | Self::Details => Self::Basics,
            Self::Photos => Self::Details,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostWizard {
    pub step: WizardStep,
    pub post_type: Option<PostType>,
    pub title: String,
    pub description: String,
    pub pet_type: String,
    pub pet_species: String,
    pub pet_age: String,
    pub pet_size: Option<PetSize>,
    pub donation_goal: String,
    pub images: Vec<Attachment>,
    pub error: Option<String>,
}

impl PostWizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn is_donation(&self) -> bool {
        self.post_type == Some(PostType::Donation)
    }

    fn validate_basics(&self) -> Result<(), String> {
        if self.post_type.is_none() || is_blank(&self.title) || is_blank(&self.description) {
            return Err("Please fill in all required fields".to_owned());
        }
        Ok(())
    }

    fn validate_details(&self) -> Result<(), String> {
        if is_blank(&self.pet_type) || is_blank(&self.pet_species) || is_blank(&self.pet_age) || self.pet_size.is_none()
        {
            return Err("Please fill in all pet details".to_owned());
        }
        if self.is_donation() && is_blank(&self.donation_goal) {
            return Err("Please set a donation goal".to_owned());
        }
        Ok(())
    }

    fn validate_photos(&self) -> Result<(), String> {
        if self.images.is_empty() {
            return Err("Please upload at least one photo".to_owned());
        }
        Ok(())
    }

    /// Validate the current step and move to the next one.
    ///
    /// # Errors
    ///
    /// Returns the step's validation message; the step does not change.
    pub fn advance(&mut self) -> Result<WizardStep, String> {
        let checked = match self.step {
            WizardStep::Basics => self.validate_basics(),
            WizardStep::Details => self.validate_details(),
            WizardStep::Photos => self.validate_photos(),
        };
        if let Err(message) = checked {
            self.error = Some(message.clone());
            return Err(message);
        }
        self.error = None;
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Step back without validating. Stays on the first step.
    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    pub fn add_images(&mut self, files: impl IntoIterator<Item = Attachment>) {
        self.images.extend(files);
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Multipart body for `POST /posts/create/`.
    ///
    /// # Errors
    ///
    /// Returns the photo-step message when no image was added.
    pub fn payload(&self) -> Result<MultipartPayload, String> {
        self.validate_photos()?;
        let mut payload = MultipartPayload::new()
            .text("type", self.post_type.map(PostType::as_str).unwrap_or_default())
            .text("title", self.title.clone())
            .text("description", self.description.clone())
            .text("pet_type", self.pet_type.clone())
            .text("pet_species", self.pet_species.clone())
            .text("pet_age", self.pet_age.trim())
            .text("pet_size", self.pet_size.map(PetSize::as_str).unwrap_or_default());
        payload = if self.is_donation() && !is_blank(&self.donation_goal) {
            payload.text("donation_goal", self.donation_goal.trim()).text("donations_enabled", "true")
        } else {
            payload.text("donations_enabled", "false")
        };
        for image in &self.images {
            payload = payload.file("images", image.clone());
        }
        Ok(payload)
    }

    /// The form's primary button: *Continue* before the photos step,
    /// *Publish Post* on it. `Ok(None)` means the wizard moved forward.
    ///
    /// # Errors
    ///
    /// Returns the validation message, the server's message, or the fixed
    /// fallback; the wizard stays on the current step.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Option<Post>, String> {
        if self.step != WizardStep::Photos {
            return self.advance().map(|_| None);
        }
        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(message) => {
                self.error = Some(message.clone());
                return Err(message);
            }
        };
        self.error = None;
        match services::posts::create(api, payload).await {
            Ok(post) => {
                tracing::info!(post = %post.id, "post created");
                Ok(Some(post))
            }
            Err(e) => {
                tracing::warn!(error = %e, "post creation failed");
                let message = e.user_message("Failed to create post. Please try again.");
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}
