//! Per-route page models.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page fetches its snapshot on mount, keeps local filter state, and
//! recomputes the visible list from the full snapshot on every change. Pages
//! never render; they expose labels, counts and decisions for a front-end.
//!
//! DESIGN
//! ======
//! Fetch failures are logged and defaulted to empty collections unless the
//! page surfaces an error message, matching how each route reports problems.

pub mod admin;
pub mod badges;
pub mod blog;
pub mod dashboard;
pub mod donations;
pub mod guard;
pub mod items;
pub mod manual_payments;
pub mod orders;
pub mod pet_detail;
pub mod pets;
pub mod store;

/// Normalize a search box value for case-insensitive matching.
pub(crate) fn search_needle(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether `field` contains `needle`, where `needle` came from [`search_needle`].
pub(crate) fn field_matches(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}

/// `"Showing N of M <noun>"` footer shared by list pages.
#[must_use]
pub fn showing_label(visible: usize, total: usize, noun: &str) -> String {
    format!("Showing {visible} of {total} {noun}")
}
