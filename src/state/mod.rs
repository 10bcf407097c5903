//! Session-scoped client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` owns the signed-in user and its persisted token; `bookmarks` keeps
//! the set of bookmarked post ids that list pages render against.

pub mod auth;
pub mod bookmarks;
