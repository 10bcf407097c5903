//! Available in-kind items and the claim action.

#[cfg(test)]
#[path = "items_test.rs"]
mod items_test;

use super::{field_matches, search_needle, showing_label};
use crate::net::api::ApiClient;
use crate::net::types::{Item, User};
use crate::services;

pub const FETCH_ERROR: &str = "Failed to fetch items";
pub const LOGIN_TO_CLAIM: &str = "Please login to claim items";
pub const CLAIM_ERROR: &str = "Failed to claim item";

#[derive(Clone, Debug, PartialEq)]
pub struct ItemsPage {
    pub items: Vec<Item>,
    pub search: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for ItemsPage {
    fn default() -> Self {
        Self { items: Vec::new(), search: String::new(), is_loading: true, error: None }
    }
}

impl ItemsPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mount(&mut self, api: &ApiClient) {
        self.is_loading = true;
        match services::items::list(api).await {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch items");
                self.error = Some(FETCH_ERROR.to_owned());
            }
        }
        self.is_loading = false;
    }

    /// Search covers the item name, its description and its type.
    #[must_use]
    pub fn visible(&self) -> Vec<&Item> {
        let needle = search_needle(&self.search);
        self.items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || field_matches(Some(item.item_name.as_str()), &needle)
                    || field_matches(item.description.as_deref(), &needle)
                    || field_matches(Some(item.item_type.as_str()), &needle)
            })
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        showing_label(self.visible().len(), self.items.len(), "items")
    }

    /// Claim an item for `user`. The listing only shows unclaimed items, so a
    /// successful claim drops the row.
    ///
    /// # Errors
    ///
    /// Returns [`LOGIN_TO_CLAIM`] without a request when signed out, otherwise
    /// the server message (e.g. "Item is already claimed") or [`CLAIM_ERROR`].
    pub async fn claim(&mut self, api: &ApiClient, user: Option<&User>, item_id: &str) -> Result<Item, String> {
        if user.is_none() {
            return Err(LOGIN_TO_CLAIM.to_owned());
        }
        let claimed = services::items::claim(api, item_id).await.map_err(|e| {
            tracing::warn!(error = %e, item = %item_id, "failed to claim item");
            e.user_message(CLAIM_ERROR)
        })?;
        self.items.retain(|item| item.id != item_id);
        Ok(claimed)
    }
}
