//! Sign-in, registration and profile forms.
//!
//! SYSTEM CONTEXT
//! ==============
//! These forms drive `AuthContext`, which owns the persisted session. They
//! add only local validation and the user-facing failure text.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use super::is_blank;
use crate::net::multipart::{Attachment, MultipartPayload};
use crate::net::types::{LoginRequest, PasswordChange, ProfileUpdate, User};
use crate::services;
use crate::state::auth::AuthContext;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Shown for every reset request; the backend has no reset endpoint.
pub const FORGOT_PASSWORD_MESSAGE: &str = "Password reset functionality not implemented yet";

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns the server's message or "Invalid email or password. Please try again.".
    pub async fn submit(&mut self, auth: &mut AuthContext) -> Result<User, String> {
        let credentials = LoginRequest { email: self.email.trim().to_owned(), password: self.password.clone() };
        match auth.login(&credentials).await {
            Ok(user) => {
                self.error = None;
                Ok(user.clone())
            }
            Err(e) => {
                let message = e.user_message("Invalid email or password. Please try again.");
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}

// =============================================================================
// REGISTER
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegisterStep {
    #[default]
    Account,
    Identity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub step: RegisterStep,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub nid_photo: Option<Attachment>,
    pub error: Option<String>,
}

impl RegisterForm {
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        match self.step {
            RegisterStep::Account => 50,
            RegisterStep::Identity => 100,
        }
    }

    fn validate_account(&self) -> Result<(), String> {
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_owned());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 8 characters long".to_owned());
        }
        if is_blank(&self.username) {
            return Err("Username is required".to_owned());
        }
        Ok(())
    }

    /// Validate the account step and move to the NID photo step.
    ///
    /// # Errors
    ///
    /// Returns the first failing check's message.
    pub fn advance(&mut self) -> Result<(), String> {
        let checked = self.validate_account();
        self.error = checked.as_ref().err().cloned();
        checked?;
        self.step = RegisterStep::Identity;
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = RegisterStep::Account;
    }

    /// # Errors
    ///
    /// Returns "Please upload your NID photo" when no photo was chosen.
    pub fn payload(&self) -> Result<MultipartPayload, String> {
        self.validate_account()?;
        let Some(photo) = &self.nid_photo else {
            return Err("Please upload your NID photo".to_owned());
        };
        Ok(MultipartPayload::new()
            .text("username", self.username.trim())
            .text("first_name", self.first_name.clone())
            .text("last_name", self.last_name.clone())
            .text("email", self.email.trim())
            .text("password", self.password.clone())
            .file("nid_photo", photo.clone()))
    }

    /// Create the account and sign in.
    ///
    /// # Errors
    ///
    /// Returns the validation message, the server's message, or a fixed fallback.
    pub async fn submit(&mut self, auth: &mut AuthContext) -> Result<User, String> {
        if self.step == RegisterStep::Account {
            self.advance()?;
        }
        let result = match self.payload() {
            Ok(payload) => auth
                .register(payload)
                .await
                .map(Clone::clone)
                .map_err(|e| e.user_message("Registration failed. Please try again.")),
            Err(message) => Err(message),
        };
        self.error = result.as_ref().err().cloned();
        result
    }
}

// =============================================================================
// PROFILE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
    pub bio: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl ProfileForm {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            email: user.email.clone(),
            location: user.location.clone().unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
            location: Some(self.location.clone()),
            bio: Some(self.bio.clone()),
        }
    }

    /// # Errors
    ///
    /// Returns the server's message or a fixed fallback.
    pub async fn submit(&mut self, auth: &mut AuthContext) -> Result<(), String> {
        self.success = None;
        match auth.update_profile(&self.to_update()).await {
            Ok(_) => {
                self.error = None;
                self.success = Some("Profile updated successfully!".to_owned());
                Ok(())
            }
            Err(e) => {
                let message = e.user_message("Failed to update profile. Please try again.");
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    /// Replace the profile photo.
    ///
    /// # Errors
    ///
    /// Returns the server's message or a fixed fallback.
    pub async fn upload_photo(&mut self, auth: &mut AuthContext, photo: Attachment) -> Result<(), String> {
        self.success = None;
        match auth.upload_photo(photo).await {
            Ok(_) => {
                self.error = None;
                self.success = Some("Profile photo updated successfully!".to_owned());
                Ok(())
            }
            Err(e) => {
                let message = e.user_message("Failed to upload photo. Please try again.");
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl PasswordForm {
    /// # Errors
    ///
    /// Returns the message to show when the new passwords differ or are too short.
    pub fn validate(&self) -> Result<PasswordChange, String> {
        if self.new_password != self.confirm_password {
            return Err("New passwords do not match".to_owned());
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err("New password must be at least 8 characters long".to_owned());
        }
        Ok(PasswordChange { old_password: self.current_password.clone(), new_password: self.new_password.clone() })
    }

    /// # Errors
    ///
    /// Returns the validation message, the server's message, or a fixed fallback.
    pub async fn submit(&mut self, auth: &AuthContext) -> Result<(), String> {
        self.success = None;
        let result = match self.validate() {
            Ok(change) => services::auth::change_password(auth.api(), &change)
                .await
                .map(drop)
                .map_err(|e| e.user_message("Failed to change password. Please try again.")),
            Err(message) => Err(message),
        };
        match result {
            Ok(()) => {
                *self = Self { success: Some("Password changed successfully!".to_owned()), ..Self::default() };
                Ok(())
            }
            Err(message) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}

/// Forgot-password requests always fail with [`FORGOT_PASSWORD_MESSAGE`].
///
/// # Errors
///
/// Always.
pub fn request_password_reset(email: &str) -> Result<(), String> {
    tracing::info!(%email, "password reset requested");
    Err(FORGOT_PASSWORD_MESSAGE.to_owned())
}
