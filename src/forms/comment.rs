//! Comment thread under a post.

#[cfg(test)]
#[path = "comment_test.rs"]
mod comment_test;

use super::is_blank;
use crate::net::api::ApiClient;
use crate::net::types::{Comment, User};
use crate::services;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentSection {
    pub post_id: String,
    pub comments: Vec<Comment>,
    pub draft: String,
    pub error: Option<String>,
}

impl CommentSection {
    #[must_use]
    pub fn new(post_id: impl Into<String>) -> Self {
        Self { post_id: post_id.into(), ..Self::default() }
    }

    /// Load the thread; a failure leaves it empty.
    pub async fn load(&mut self, api: &ApiClient) {
        self.comments = services::comments::for_post(api, &self.post_id).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, post = %self.post_id, "failed to load comments");
            Vec::new()
        });
    }

    /// # Errors
    ///
    /// Returns the message to show when nobody is signed in or the draft is blank.
    pub fn validate(&self, user: Option<&User>) -> Result<String, String> {
        if user.is_none() {
            return Err("Please login to comment".to_owned());
        }
        if is_blank(&self.draft) {
            return Err("Please enter a comment".to_owned());
        }
        Ok(self.draft.trim().to_owned())
    }

    /// Post the draft; the new comment goes to the top of the thread.
    ///
    /// # Errors
    ///
    /// Returns the validation message, the server's message, or a fixed fallback.
    pub async fn submit(&mut self, api: &ApiClient, user: Option<&User>) -> Result<(), String> {
        let result = match self.validate(user) {
            Ok(content) => services::comments::create(api, &self.post_id, &content)
                .await
                .map_err(|e| e.user_message("Failed to post comment")),
            Err(message) => Err(message),
        };
        match result {
            Ok(comment) => {
                self.comments.insert(0, comment);
                self.draft.clear();
                self.error = None;
                Ok(())
            }
            Err(message) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    /// Delete a comment; on failure the thread is left unchanged.
    pub async fn delete(&mut self, api: &ApiClient, comment_id: &str) {
        match services::comments::delete(api, comment_id).await {
            Ok(()) => self.comments.retain(|comment| comment.id != comment_id),
            Err(e) => tracing::warn!(error = %e, comment = %comment_id, "failed to delete comment"),
        }
    }

    /// Whether `user` may delete `comment`: its author or staff.
    #[must_use]
    pub fn can_delete(comment: &Comment, user: Option<&User>) -> bool {
        user.is_some_and(|user| user.is_staff || user.id == comment.user.id)
    }
}
