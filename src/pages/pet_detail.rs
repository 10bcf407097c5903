//! Single pet page: listing, progress updates and the donation entry point.

#[cfg(test)]
#[path = "pet_detail_test.rs"]
mod pet_detail_test;

use serde_json::Value;

use crate::forms::comment::CommentSection;
use crate::forms::donation::DonationForm;
use crate::net::api::{ApiClient, unwrap_envelope};
use crate::net::types::{Post, PostType, PostUpdate, User};
use crate::services;
use crate::util::format::progress_percent;

pub const INVALID_DATA: &str = "Invalid pet data format";
pub const FETCH_ERROR: &str = "Failed to fetch pet details";
pub const LOGIN_TO_DONATE: &str = "Please login to make a donation";
pub const NOT_AUTHORIZED_DELETE: &str = "Not authorized to delete this post";
pub const DELETE_ERROR: &str = "Failed to delete post";

/// Whether the donate button is shown and what it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DonationOffer {
    /// Adoption listing; no donate button.
    NotApplicable,
    /// Shown but disabled with [`LOGIN_TO_DONATE`].
    LoginRequired,
    /// The owner switched donations off.
    Closed,
    Available,
}

/// Accept a `/posts/{id}/` body only if it carries a post id.
///
/// # Errors
///
/// Returns [`INVALID_DATA`] for any other shape.
pub fn parse_pet(body: Value) -> Result<Post, String> {
    let body = unwrap_envelope(body);
    let has_id = match body.get("id") {
        Some(Value::String(id)) => !id.is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    };
    if !has_id {
        return Err(INVALID_DATA.to_owned());
    }
    serde_json::from_value(body).map_err(|e| {
        tracing::warn!(error = %e, "pet payload did not decode");
        INVALID_DATA.to_owned()
    })
}

#[must_use]
pub fn donation_offer(post: &Post, user: Option<&User>) -> DonationOffer {
    if post.post_type != PostType::Donation {
        DonationOffer::NotApplicable
    } else if user.is_none() {
        DonationOffer::LoginRequired
    } else if !post.donations_enabled {
        DonationOffer::Closed
    } else {
        DonationOffer::Available
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PetDetailPage {
    pub post_id: String,
    pub pet: Option<Post>,
    pub updates: Vec<PostUpdate>,
    pub comments: CommentSection,
    pub selected_image: usize,
    pub show_donation_form: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl PetDetailPage {
    #[must_use]
    pub fn new(post_id: impl Into<String>) -> Self {
        let post_id = post_id.into();
        Self {
            comments: CommentSection::new(post_id.clone()),
            post_id,
            pet: None,
            updates: Vec::new(),
            selected_image: 0,
            show_donation_form: false,
            is_loading: true,
            error: None,
        }
    }

    /// Fetch the post, then its updates and comments.
    pub async fn mount(&mut self, api: &ApiClient) {
        self.is_loading = true;
        let result = match services::posts::get_value(api, &self.post_id).await {
            Ok(body) => parse_pet(body),
            Err(e) => {
                tracing::warn!(error = %e, post = %self.post_id, "failed to fetch pet");
                Err(FETCH_ERROR.to_owned())
            }
        };
        match result {
            Ok(pet) => {
                self.pet = Some(pet);
                self.selected_image = 0;
                self.error = None;
                self.updates = services::posts::updates(api, &self.post_id).await.unwrap_or_else(|e| {
                    tracing::warn!(error = %e, post = %self.post_id, "failed to fetch post updates");
                    Vec::new()
                });
                self.comments.load(api).await;
            }
            Err(message) => self.error = Some(message),
        }
        self.is_loading = false;
    }

    pub fn select_image(&mut self, index: usize) {
        let count = self.pet.as_ref().map_or(0, |pet| pet.images.len());
        if index < count {
            self.selected_image = index;
        }
    }

    #[must_use]
    pub fn offer(&self, user: Option<&User>) -> DonationOffer {
        self.pet.as_ref().map_or(DonationOffer::NotApplicable, |pet| donation_offer(pet, user))
    }

    /// Open the donation form when the offer is available.
    #[must_use]
    pub fn donation_form(&mut self, user: Option<&User>) -> Option<DonationForm> {
        let pet = self.pet.as_ref()?;
        let user = user?;
        if donation_offer(pet, Some(user)) != DonationOffer::Available {
            return None;
        }
        self.show_donation_form = true;
        Some(DonationForm::for_post(pet, user))
    }

    /// `"N% funded"` for donation posts with a goal.
    #[must_use]
    pub fn funded_label(&self) -> Option<String> {
        let pet = self.pet.as_ref().filter(|pet| pet.post_type == PostType::Donation)?;
        let goal = pet.donation_goal.filter(|goal| *goal > 0.0)?;
        Some(format!("{:.0}% funded", progress_percent(pet.current_amount, goal).round()))
    }

    /// Whether `user` owns the listing and may edit it or post updates.
    #[must_use]
    pub fn is_owner(&self, user: Option<&User>) -> bool {
        match (self.pet.as_ref(), user) {
            (Some(pet), Some(user)) => !user.id.is_empty() && pet.user.id == user.id,
            _ => false,
        }
    }

    /// Delete the listing. Owners and staff may delete; the page forgets the
    /// post on success.
    ///
    /// # Errors
    ///
    /// Returns [`NOT_AUTHORIZED_DELETE`] without a request for anyone else,
    /// otherwise the server message or [`DELETE_ERROR`].
    pub async fn delete(&mut self, api: &ApiClient, user: Option<&User>) -> Result<&'static str, String> {
        let is_staff = user.is_some_and(|user| user.is_staff);
        if !(self.is_owner(user) || is_staff) {
            return Err(NOT_AUTHORIZED_DELETE.to_owned());
        }
        services::posts::delete(api, &self.post_id).await.map_err(|e| {
            tracing::warn!(error = %e, post = %self.post_id, "failed to delete post");
            e.user_message(DELETE_ERROR)
        })?;
        tracing::info!(post = %self.post_id, "post deleted");
        self.pet = None;
        self.updates.clear();
        Ok("Post deleted successfully")
    }
}
