//! Pet listing page: server-side search plus a client-side type tab.
//!
//! DESIGN
//! ======
//! Search, type, pet type and size go to the backend as query parameters; the
//! tab only narrows the fetched snapshot, so switching tabs never refetches.
//! Bookmarks are loaded once per signed-in mount and then patched from each
//! toggle response.

#[cfg(test)]
#[path = "pets_test.rs"]
mod pets_test;

use super::showing_label;
use crate::net::api::ApiClient;
use crate::net::types::{PetSize, Post, PostType, User};
use crate::services;
use crate::services::posts::PostQuery;
use crate::state::bookmarks::BookmarkSet;
use crate::util::format::progress_percent;

pub const FETCH_ERROR: &str = "Failed to fetch pets";
pub const LOGIN_TO_BOOKMARK: &str = "Please login to bookmark pets";
pub const BOOKMARK_ERROR: &str = "Failed to bookmark pet";

/// Filters sent to `GET /posts/`. `None` means "all".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PetFilters {
    pub search: String,
    pub post_type: Option<PostType>,
    pub pet_type: Option<String>,
    pub pet_size: Option<PetSize>,
}

impl PetFilters {
    #[must_use]
    pub fn to_query(&self) -> PostQuery {
        let search = self.search.trim();
        PostQuery {
            post_type: self.post_type,
            pet_type: self.pet_type.clone().filter(|t| !t.trim().is_empty()),
            pet_size: self.pet_size,
            search: (!search.is_empty()).then(|| search.to_owned()),
            ..PostQuery::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TabCounts {
    pub all: usize,
    pub adoption: usize,
    pub donation: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PetsPage {
    pub filters: PetFilters,
    pub tab: Option<PostType>,
    pub pets: Vec<Post>,
    pub bookmarks: BookmarkSet,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for PetsPage {
    fn default() -> Self {
        Self {
            filters: PetFilters::default(),
            tab: None,
            pets: Vec::new(),
            bookmarks: BookmarkSet::default(),
            is_loading: true,
            error: None,
        }
    }
}

impl PetsPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch pets, and bookmarks when someone is signed in.
    pub async fn mount(&mut self, api: &ApiClient, user: Option<&User>) {
        self.fetch(api).await;
        if user.is_some() {
            self.fetch_bookmarks(api).await;
        }
    }

    /// Refetch with the current filters.
    pub async fn fetch(&mut self, api: &ApiClient) {
        self.is_loading = true;
        match services::posts::list(api, &self.filters.to_query()).await {
            Ok(page) => {
                self.pets = page.data;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch pets");
                self.error = Some(e.user_message(FETCH_ERROR));
            }
        }
        self.is_loading = false;
    }

    pub async fn fetch_bookmarks(&mut self, api: &ApiClient) {
        self.bookmarks = match services::bookmarks::list(api).await {
            Ok(bookmarks) => BookmarkSet::from_bookmarks(&bookmarks),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch bookmarks");
                BookmarkSet::default()
            }
        };
    }

    /// Toggle a bookmark and apply the server's answer.
    ///
    /// # Errors
    ///
    /// Returns a message when nobody is signed in or the call fails; the set
    /// is unchanged in both cases.
    pub async fn toggle_bookmark(&mut self, api: &ApiClient, user: Option<&User>, post_id: &str) -> Result<bool, String> {
        if user.is_none() {
            return Err(LOGIN_TO_BOOKMARK.to_owned());
        }
        let status = services::bookmarks::toggle(api, post_id).await.map_err(|e| {
            tracing::warn!(error = %e, post = %post_id, "bookmark toggle failed");
            BOOKMARK_ERROR.to_owned()
        })?;
        self.bookmarks.set(post_id, status.is_bookmarked);
        Ok(status.is_bookmarked)
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&Post> {
        self.pets.iter().filter(|pet| self.tab.is_none_or(|tab| pet.post_type == tab)).collect()
    }

    #[must_use]
    pub fn tab_counts(&self) -> TabCounts {
        let count = |kind: PostType| self.pets.iter().filter(|pet| pet.post_type == kind).count();
        TabCounts { all: self.pets.len(), adoption: count(PostType::Adoption), donation: count(PostType::Donation) }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        showing_label(self.visible().len(), self.pets.len(), "pets")
    }
}

/// Funding progress for a donation post with a goal; `None` otherwise.
#[must_use]
pub fn funding_progress(post: &Post) -> Option<f64> {
    if post.post_type != PostType::Donation {
        return None;
    }
    post.donation_goal.map(|goal| progress_percent(post.current_amount, goal))
}
