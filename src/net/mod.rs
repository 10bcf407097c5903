//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the HTTP client and response decoding, `multipart` assembles
//! file-bearing request bodies, and `types` defines the wire schema shared by
//! every service module.

pub mod api;
pub mod multipart;
pub mod types;
