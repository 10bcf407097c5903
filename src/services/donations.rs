//! Donation endpoints: online, manual receipt, and admin review.

use reqwest::Method;

use crate::net::api::{ApiClient, ApiError};
use crate::net::multipart::MultipartPayload;
use crate::net::types::{Donation, DonationCreate, ReviewAction, ReviewRequest};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DonationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub post_id: Option<String>,
}

impl DonationQuery {
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(post_id) = &self.post_id {
            pairs.push(("post_id", post_id.clone()));
        }
        pairs
    }
}

pub(crate) fn for_post_path(post_id: &str) -> String {
    format!("/donations/post/{post_id}/")
}

pub(crate) fn review_path(donation_id: &str) -> String {
    format!("/donations/{donation_id}/review/")
}

/// `GET /donations/`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(api: &ApiClient, query: &DonationQuery) -> Result<Vec<Donation>, ApiError> {
    api.get_list("/donations/", &query.to_pairs()).await
}

/// Record a completed online donation.
///
/// # Errors
///
/// Returns an error if the request fails or the backend rejects the amount.
pub async fn create(api: &ApiClient, donation: &DonationCreate) -> Result<Donation, ApiError> {
    api.post_json("/donations/create/", donation).await
}

/// Submit a bank-transfer receipt; the donation starts out `pending`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn create_manual(api: &ApiClient, payload: MultipartPayload) -> Result<Donation, ApiError> {
    api.multipart(Method::POST, "/donations/create-manual/", payload).await
}

/// Verified donations toward one post.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn for_post(api: &ApiClient, post_id: &str) -> Result<Vec<Donation>, ApiError> {
    api.get_list(&for_post_path(post_id), &[]).await
}

/// Donations made by the current user.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn for_user(api: &ApiClient) -> Result<Vec<Donation>, ApiError> {
    api.get_list("/donations/user/", &[]).await
}

/// Manual donations awaiting admin review.
///
/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn pending_manual(api: &ApiClient) -> Result<Vec<Donation>, ApiError> {
    api.get_list("/donations/admin/pending/", &[]).await
}

/// Approve or reject a manual donation.
///
/// # Errors
///
/// Returns an error if the request fails or the caller is not staff.
pub async fn review(
    api: &ApiClient,
    donation_id: &str,
    action: ReviewAction,
    admin_notes: Option<String>,
) -> Result<Donation, ApiError> {
    let body = ReviewRequest { action, admin_notes };
    api.put_json(&review_path(donation_id), &body).await
}
