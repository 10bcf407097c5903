//! Public donation history with search, status filter and sort.

#[cfg(test)]
#[path = "donations_test.rs"]
mod donations_test;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::{field_matches, search_needle, showing_label};
use crate::net::api::ApiClient;
use crate::net::types::{Donation, DonationStatus};
use crate::services;
use crate::services::donations::DonationQuery;
use crate::util::format::parse_timestamp;

pub const FETCH_LIMIT: u32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DonationSort {
    #[default]
    Recent,
    Oldest,
    AmountHigh,
    AmountLow,
}

impl DonationSort {
    pub const ALL: [Self; 4] = [Self::Recent, Self::Oldest, Self::AmountHigh, Self::AmountLow];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Oldest => "oldest",
            Self::AmountHigh => "amount-high",
            Self::AmountLow => "amount-low",
        }
    }

    fn compare(self, a: &Donation, b: &Donation) -> Ordering {
        match self {
            Self::Recent => created_millis(b).cmp(&created_millis(a)),
            Self::Oldest => created_millis(a).cmp(&created_millis(b)),
            Self::AmountHigh => b.amount.total_cmp(&a.amount),
            Self::AmountLow => a.amount.total_cmp(&b.amount),
        }
    }
}

impl fmt::Display for DonationSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationSort {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == raw.trim())
            .ok_or_else(|| format!("unknown sort: {raw}"))
    }
}

/// Unparseable timestamps sort as the epoch.
fn created_millis(donation: &Donation) -> i128 {
    parse_timestamp(&donation.created_at).map_or(0, |ts| ts.unix_timestamp_nanos() / 1_000_000)
}

/// Which donations the page lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DonationScope {
    /// The public feed, capped at [`FETCH_LIMIT`].
    #[default]
    All,
    /// The signed-in user's own donations.
    Mine,
    /// Verified donations toward one post.
    Post(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DonationsPage {
    pub scope: DonationScope,
    pub donations: Vec<Donation>,
    pub search: String,
    pub status: Option<DonationStatus>,
    pub sort: DonationSort,
    pub is_loading: bool,
}

impl Default for DonationsPage {
    fn default() -> Self {
        Self {
            scope: DonationScope::default(),
            donations: Vec::new(),
            search: String::new(),
            status: None,
            sort: DonationSort::default(),
            is_loading: true,
        }
    }
}

impl DonationsPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scoped(scope: DonationScope) -> Self {
        Self { scope, ..Self::default() }
    }

    pub async fn mount(&mut self, api: &ApiClient) {
        self.is_loading = true;
        let result = match &self.scope {
            DonationScope::All => {
                let query = DonationQuery { limit: Some(FETCH_LIMIT), ..DonationQuery::default() };
                services::donations::list(api, &query).await
            }
            DonationScope::Mine => services::donations::for_user(api).await,
            DonationScope::Post(post_id) => services::donations::for_post(api, post_id).await,
        };
        self.donations = result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, scope = ?self.scope, "failed to fetch donations");
            Vec::new()
        });
        self.is_loading = false;
    }

    /// Sum of every loaded donation, before filters.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.donations.iter().map(|donation| donation.amount).sum()
    }

    /// Search AND status, then sort. Search covers the post title, the donor's
    /// names and the message.
    #[must_use]
    pub fn visible(&self) -> Vec<&Donation> {
        let needle = search_needle(&self.search);
        let mut visible: Vec<&Donation> = self
            .donations
            .iter()
            .filter(|donation| {
                needle.is_empty()
                    || field_matches(Some(donation.post.title.as_str()), &needle)
                    || field_matches(donation.donor.first_name.as_deref(), &needle)
                    || field_matches(donation.donor.last_name.as_deref(), &needle)
                    || field_matches(donation.message.as_deref(), &needle)
            })
            .filter(|donation| self.status.is_none_or(|status| donation.status == status))
            .collect();
        visible.sort_by(|a, b| self.sort.compare(a, b));
        visible
    }

    #[must_use]
    pub fn summary(&self) -> String {
        showing_label(self.visible().len(), self.donations.len(), "donations")
    }
}

/// Badge colour class for a donation status.
#[must_use]
pub fn status_tone(status: DonationStatus) -> &'static str {
    match status {
        DonationStatus::Verified => "success",
        DonationStatus::Pending => "warning",
        DonationStatus::Rejected => "danger",
    }
}
