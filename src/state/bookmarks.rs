//! Bookmarked post ids for the current user.

#[cfg(test)]
#[path = "bookmarks_test.rs"]
mod bookmarks_test;

use std::collections::BTreeSet;

use crate::net::types::Bookmark;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    post_ids: BTreeSet<String>,
}

impl BookmarkSet {
    #[must_use]
    pub fn from_bookmarks(bookmarks: &[Bookmark]) -> Self {
        Self { post_ids: bookmarks.iter().map(|b| b.post.clone()).collect() }
    }

    #[must_use]
    pub fn contains(&self, post_id: &str) -> bool {
        self.post_ids.contains(post_id)
    }

    /// Flip local membership and return the new state.
    pub fn toggle(&mut self, post_id: &str) -> bool {
        if self.post_ids.remove(post_id) {
            false
        } else {
            self.post_ids.insert(post_id.to_owned());
            true
        }
    }

    /// Apply the server's answer after a toggle call.
    pub fn set(&mut self, post_id: &str, is_bookmarked: bool) {
        if is_bookmarked {
            self.post_ids.insert(post_id.to_owned());
        } else {
            self.post_ids.remove(post_id);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.post_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.post_ids.is_empty()
    }
}
