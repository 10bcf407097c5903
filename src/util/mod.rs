//! Utility helpers shared across forms and pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Formatting and media-path helpers are kept free of I/O so list pages and
//! forms can share them and test them without a backend.

pub mod format;
pub mod media;
