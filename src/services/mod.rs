//! Typed REST calls, one module per backend resource.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each function maps one endpoint to a typed async call over a shared
//! `ApiClient`. Services never cache or retry; forms and pages decide what to
//! do with a failure. Path builders are plain functions so they can be
//! checked without a backend.

pub mod admin;
pub mod auth;
pub mod badges;
pub mod blogs;
pub mod bookmarks;
pub mod comments;
pub mod donations;
pub mod items;
pub mod orders;
pub mod posts;
pub mod products;
pub mod stores;
pub mod volunteer;

#[cfg(test)]
#[path = "paths_test.rs"]
mod paths_test;
