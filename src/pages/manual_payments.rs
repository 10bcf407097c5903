//! Staff review queue for receipt-backed donations.

#[cfg(test)]
#[path = "manual_payments_test.rs"]
mod manual_payments_test;

use crate::net::api::ApiClient;
use crate::net::types::{Donation, ReviewAction, User};
use crate::services;

pub const FETCH_ERROR: &str = "Failed to fetch pending donations";

#[derive(Clone, Debug, PartialEq)]
pub struct ManualPaymentsPage {
    pub donations: Vec<Donation>,
    /// Donation open in the review dialog.
    pub selected: Option<String>,
    pub admin_notes: String,
    pub is_loading: bool,
    pub is_processing: bool,
    pub error: Option<String>,
}

impl Default for ManualPaymentsPage {
    fn default() -> Self {
        Self {
            donations: Vec::new(),
            selected: None,
            admin_notes: String::new(),
            is_loading: true,
            is_processing: false,
            error: None,
        }
    }
}

impl ManualPaymentsPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the queue for staff; anyone else gets nothing fetched.
    pub async fn mount(&mut self, api: &ApiClient, user: Option<&User>) {
        if user.is_some_and(|user| user.is_staff) {
            self.fetch(api).await;
        }
    }

    pub async fn fetch(&mut self, api: &ApiClient) {
        self.is_loading = true;
        match services::donations::pending_manual(api).await {
            Ok(donations) => {
                self.donations = donations;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch pending donations");
                self.error = Some(FETCH_ERROR.to_owned());
            }
        }
        self.is_loading = false;
    }

    /// Open the review dialog with empty notes.
    pub fn open_review(&mut self, donation_id: &str) {
        self.selected = Some(donation_id.to_owned());
        self.admin_notes.clear();
    }

    pub fn close_review(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected_donation(&self) -> Option<&Donation> {
        let id = self.selected.as_deref()?;
        self.donations.iter().find(|donation| donation.id == id)
    }

    /// Approve or reject the open donation, then close the dialog and refetch.
    ///
    /// Does nothing and returns `Ok(None)` when no donation is open.
    ///
    /// # Errors
    ///
    /// Returns the failure message; the dialog stays open.
    pub async fn review(&mut self, api: &ApiClient, action: ReviewAction) -> Result<Option<&'static str>, String> {
        let Some(donation_id) = self.selected.clone() else {
            return Ok(None);
        };
        let notes = Some(self.admin_notes.trim().to_owned()).filter(|notes| !notes.is_empty());

        self.is_processing = true;
        let result = services::donations::review(api, &donation_id, action, notes).await;
        self.is_processing = false;

        match result {
            Ok(_) => {
                tracing::info!(donation = %donation_id, ?action, "manual donation reviewed");
                self.close_review();
                self.fetch(api).await;
                Ok(Some(success_message(action)))
            }
            Err(e) => {
                tracing::warn!(error = %e, donation = %donation_id, "review failed");
                Err(failure_message(action).to_owned())
            }
        }
    }
}

fn success_message(action: ReviewAction) -> &'static str {
    match action {
        ReviewAction::Approve => "Donation approved successfully!",
        ReviewAction::Reject => "Donation rejected",
    }
}

fn failure_message(action: ReviewAction) -> &'static str {
    match action {
        ReviewAction::Approve => "Failed to approve donation",
        ReviewAction::Reject => "Failed to reject donation",
    }
}
