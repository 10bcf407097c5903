//! PawsConnect client: typed REST access, session state, forms and list
//! pages for the pet-adoption and community-commerce platform.
//!
//! ARCHITECTURE
//! ============
//! `net` owns HTTP and wire types, `services` maps each REST resource to
//! typed calls, `state` holds the session, `forms` and `pages` hold the
//! per-screen models. The `pawsconnect` binary drives them from a terminal.

pub mod config;
pub mod forms;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod storage;
pub mod util;

pub use config::ClientConfig;
pub use net::api::{ApiClient, ApiError};
pub use state::auth::AuthContext;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
