//! Blog index: search, topic filter and the featured article.

#[cfg(test)]
#[path = "blog_test.rs"]
mod blog_test;

use std::collections::BTreeSet;

use super::{field_matches, search_needle, showing_label};
use crate::net::api::ApiClient;
use crate::net::types::Blog;
use crate::services;
use crate::services::blogs::BlogQuery;

pub const EXCERPT_CHARS: usize = 200;
pub const NO_CONTENT: &str = "No content available";

#[derive(Clone, Debug, PartialEq)]
pub struct BlogPage {
    pub posts: Vec<Blog>,
    pub search: String,
    /// `None` shows every topic.
    pub topic: Option<String>,
    pub is_loading: bool,
}

impl Default for BlogPage {
    fn default() -> Self {
        Self { posts: Vec::new(), search: String::new(), topic: None, is_loading: true }
    }
}

impl BlogPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mount(&mut self, api: &ApiClient) {
        self.is_loading = true;
        self.posts = services::blogs::list(api, &BlogQuery::default()).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to fetch blog posts");
            Vec::new()
        });
        self.is_loading = false;
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&Blog> {
        let needle = search_needle(&self.search);
        self.posts
            .iter()
            .filter(|post| {
                needle.is_empty()
                    || field_matches(Some(post.title.as_str()), &needle)
                    || field_matches(post.content.as_deref(), &needle)
                    || field_matches(post.author.first_name.as_deref(), &needle)
                    || field_matches(post.author.last_name.as_deref(), &needle)
            })
            .filter(|post| self.topic.as_ref().is_none_or(|topic| post.tags.contains(topic)))
            .collect()
    }

    /// Every tag in the snapshot, sorted and de-duplicated.
    #[must_use]
    pub fn topics(&self) -> Vec<&str> {
        self.posts
            .iter()
            .flat_map(|post| post.tags.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty() || self.topic.is_some()
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.topic = None;
    }

    /// The first visible post is featured; the rest fill the grid.
    #[must_use]
    pub fn featured(&self) -> Option<&Blog> {
        self.visible().first().copied()
    }

    #[must_use]
    pub fn grid(&self) -> Vec<&Blog> {
        self.visible().into_iter().skip(1).collect()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        showing_label(self.visible().len(), self.posts.len(), "articles")
    }
}

/// First [`EXCERPT_CHARS`] characters of a post followed by `...`.
#[must_use]
pub fn excerpt(content: Option<&str>) -> String {
    let text: String = content
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(NO_CONTENT)
        .chars()
        .take(EXCERPT_CHARS)
        .collect();
    format!("{text}...")
}
