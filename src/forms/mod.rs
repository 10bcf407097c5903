//! Controlled form models.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each form owns its field values plus an `error` slot. Validation is
//! synchronous and runs before any request, so a rejected form never touches
//! the network. Submit failures are reduced to a display string: the server's
//! `error`/`message` text when it sent one, otherwise a fixed fallback.

pub mod account;
pub mod blog_create;
pub mod comment;
pub mod donation;
pub mod item;
pub mod manual_donation;
pub mod mock_payment;
pub mod payment_modal;
pub mod post_edit;
pub mod post_update;
pub mod post_wizard;
pub mod store;
pub mod volunteer;

/// Milliseconds since the Unix epoch, used for demo reference ids.
pub(crate) fn now_millis() -> i128 {
    time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
