//! Admin console: users, posts, comments and stores, one tab at a time.
//!
//! DESIGN
//! ======
//! Only the active tab's collection is fetched. Moderation actions patch the
//! local list from the response instead of refetching, and report an outcome
//! message for the front-end to show.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use std::fmt;
use std::str::FromStr;

use super::{field_matches, search_needle};
use super::guard::{self, GuardDecision, RouteAccess};
use crate::net::api::ApiClient;
use crate::net::types::{Comment, Post, Store, User};
use crate::services;

pub const FETCH_ERROR: &str = "Failed to fetch data";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Users,
    Posts,
    Comments,
    Stores,
}

impl AdminTab {
    pub const ALL: [Self; 4] = [Self::Users, Self::Posts, Self::Comments, Self::Stores];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
            Self::Comments => "comments",
            Self::Stores => "stores",
        }
    }
}

impl fmt::Display for AdminTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminTab {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == raw.trim())
            .ok_or_else(|| format!("unknown admin tab: {raw}"))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdminPage {
    pub tab: AdminTab,
    pub search: String,
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub stores: Vec<Store>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AdminPage {
    fn default() -> Self {
        Self {
            tab: AdminTab::default(),
            search: String::new(),
            users: Vec::new(),
            posts: Vec::new(),
            comments: Vec::new(),
            stores: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

impl AdminPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn access(is_loading: bool, user: Option<&User>) -> GuardDecision {
        guard::decide(RouteAccess::Admin, is_loading, user)
    }

    /// Switch tabs and load the new tab's data.
    pub async fn select_tab(&mut self, api: &ApiClient, tab: AdminTab) {
        self.tab = tab;
        self.load(api).await;
    }

    /// Fetch the active tab's collection.
    pub async fn load(&mut self, api: &ApiClient) {
        self.is_loading = true;
        let result = match self.tab {
            AdminTab::Users => services::admin::users(api).await.map(|users| self.users = users),
            AdminTab::Posts => services::admin::posts(api).await.map(|posts| self.posts = posts),
            AdminTab::Comments => services::admin::comments(api).await.map(|comments| self.comments = comments),
            AdminTab::Stores => services::stores::list(api).await.map(|stores| self.stores = stores),
        };
        match result {
            Ok(()) => self.error = None,
            Err(e) => {
                tracing::warn!(error = %e, tab = %self.tab, "failed to fetch admin data");
                self.error = Some(FETCH_ERROR.to_owned());
            }
        }
        self.is_loading = false;
    }

    #[must_use]
    pub fn visible_users(&self) -> Vec<&User> {
        let needle = search_needle(&self.search);
        self.users
            .iter()
            .filter(|user| {
                field_matches(Some(user.username.as_str()), &needle) || field_matches(Some(user.email.as_str()), &needle)
            })
            .collect()
    }

    #[must_use]
    pub fn visible_posts(&self) -> Vec<&Post> {
        let needle = search_needle(&self.search);
        self.posts
            .iter()
            .filter(|post| {
                field_matches(Some(post.title.as_str()), &needle) || field_matches(post.description.as_deref(), &needle)
            })
            .collect()
    }

    #[must_use]
    pub fn visible_comments(&self) -> Vec<&Comment> {
        let needle = search_needle(&self.search);
        self.comments
            .iter()
            .filter(|comment| {
                field_matches(Some(comment.content.as_str()), &needle)
                    || field_matches(Some(comment.user.username.as_str()), &needle)
            })
            .collect()
    }

    #[must_use]
    pub fn visible_stores(&self) -> Vec<&Store> {
        let needle = search_needle(&self.search);
        self.stores
            .iter()
            .filter(|store| {
                field_matches(Some(store.name.as_str()), &needle) || field_matches(store.description.as_deref(), &needle)
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns `"Failed to delete user"`; the list is unchanged.
    pub async fn delete_user(&mut self, api: &ApiClient, user_id: &str) -> Result<&'static str, String> {
        services::admin::delete_user(api, user_id).await.map_err(|e| {
            tracing::warn!(error = %e, user = %user_id, "failed to delete user");
            "Failed to delete user".to_owned()
        })?;
        self.users.retain(|user| user.id != user_id);
        Ok("User deleted successfully")
    }

    /// Flip a user's active flag and replace the row with the server's copy.
    ///
    /// # Errors
    ///
    /// Returns `"Failed to update user status"`; the list is unchanged.
    pub async fn toggle_user_status(&mut self, api: &ApiClient, user_id: &str) -> Result<&'static str, String> {
        let updated = services::admin::toggle_user_status(api, user_id).await.map_err(|e| {
            tracing::warn!(error = %e, user = %user_id, "failed to toggle user status");
            "Failed to update user status".to_owned()
        })?;
        let message = if updated.is_active { "User activated successfully" } else { "User deactivated successfully" };
        if let Some(row) = self.users.iter_mut().find(|user| user.id == user_id) {
            *row = updated;
        }
        Ok(message)
    }

    /// # Errors
    ///
    /// Returns `"Failed to delete post"`; the list is unchanged.
    pub async fn delete_post(&mut self, api: &ApiClient, post_id: &str) -> Result<&'static str, String> {
        services::admin::delete_post(api, post_id).await.map_err(|e| {
            tracing::warn!(error = %e, post = %post_id, "failed to delete post");
            "Failed to delete post".to_owned()
        })?;
        self.posts.retain(|post| post.id != post_id);
        Ok("Post deleted successfully")
    }

    /// # Errors
    ///
    /// Returns `"Failed to delete comment"`; the list is unchanged.
    pub async fn delete_comment(&mut self, api: &ApiClient, comment_id: &str) -> Result<&'static str, String> {
        services::admin::delete_comment(api, comment_id).await.map_err(|e| {
            tracing::warn!(error = %e, comment = %comment_id, "failed to delete comment");
            "Failed to delete comment".to_owned()
        })?;
        self.comments.retain(|comment| comment.id != comment_id);
        Ok("Comment deleted successfully")
    }
}
