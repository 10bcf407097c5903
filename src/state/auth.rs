//! Auth session for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AuthContext` is created per process and handed to pages and forms.
//! The token and a JSON snapshot of the user live in the key-value store so a
//! later run starts signed in; `init` revalidates that snapshot against the
//! backend before trusting it.
//!
//! LIFECYCLE
//! =========
//! `is_loading` starts `true` and flips to `false` once `init` finishes, so
//! route guards never redirect before the stored session has been checked.
//! `logout` always clears local state, even when the backend call fails.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api::{ApiClient, ApiError};
use crate::net::multipart::{Attachment, MultipartPayload};
use crate::net::types::{AuthResponse, LoginRequest, ProfileUpdate, User};
use crate::services;
use crate::storage::{self, ACCESS_TOKEN_KEY, USER_KEY};

#[derive(Clone, Debug)]
pub struct AuthContext {
    api: ApiClient,
    user: Option<User>,
    is_loading: bool,
}

impl AuthContext {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, user: None, is_loading: true }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_staff)
    }

    /// Restore the stored session.
    ///
    /// When both a token and a user snapshot are stored, the profile endpoint
    /// decides whether they are still valid; a failure clears both.
    pub async fn init(&mut self) {
        let token = self.api.store().get(ACCESS_TOKEN_KEY);
        let stored_user = self.api.store().get(USER_KEY);

        if token.is_some() && stored_user.is_some() {
            match services::auth::profile(&self.api).await {
                Ok(user) => {
                    self.remember_user(&user);
                    self.user = Some(user);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored session rejected; clearing");
                    self.clear_session();
                }
            }
        }
        self.is_loading = false;
    }

    /// Sign in and persist the returned token and user.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged; local state is untouched on failure.
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<&User, ApiError> {
        let response = services::auth::login(&self.api, credentials).await.inspect_err(|e| {
            tracing::warn!(error = %e, "login failed");
        })?;
        self.start_session(response)
    }

    /// Create an account from a multipart registration payload and sign in.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged; local state is untouched on failure.
    pub async fn register(&mut self, payload: MultipartPayload) -> Result<&User, ApiError> {
        let response = services::auth::register(&self.api, payload).await.inspect_err(|e| {
            tracing::warn!(error = %e, "registration failed");
        })?;
        self.start_session(response)
    }

    /// Sign out. The backend call is best effort; local state is always cleared.
    pub async fn logout(&mut self) {
        if let Err(e) = services::auth::logout(&self.api).await {
            tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
        }
        self.clear_session();
    }

    /// # Errors
    ///
    /// Returns the API error unchanged; the cached user is kept on failure.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<&User, ApiError> {
        let user = services::auth::update_profile(&self.api, update).await?;
        self.remember_user(&user);
        Ok(self.user.insert(user))
    }

    /// # Errors
    ///
    /// Returns the API error unchanged; the cached user is kept on failure.
    pub async fn upload_photo(&mut self, photo: Attachment) -> Result<&User, ApiError> {
        let user = services::auth::upload_photo(&self.api, photo).await?;
        self.remember_user(&user);
        Ok(self.user.insert(user))
    }

    fn start_session(&mut self, response: AuthResponse) -> Result<&User, ApiError> {
        self.api.store().set(ACCESS_TOKEN_KEY, &response.token)?;
        storage::save_json(self.api.store().as_ref(), USER_KEY, &response.user)?;
        tracing::info!(user = %response.user.username, "signed in");
        Ok(self.user.insert(response.user))
    }

    fn remember_user(&self, user: &User) {
        if let Err(e) = storage::save_json(self.api.store().as_ref(), USER_KEY, user) {
            tracing::warn!(error = %e, "failed to persist user snapshot");
        }
    }

    fn clear_session(&mut self) {
        for key in [ACCESS_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.api.store().remove(key) {
                tracing::warn!(%key, error = %e, "failed to clear stored session key");
            }
        }
        self.user = None;
    }
}
