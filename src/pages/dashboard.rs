//! Signed-in landing page: recent pets, recent donations and earned badges.
//!
//! DESIGN
//! ======
//! The three fetches run concurrently and fail independently; a failed one
//! shows as an empty section while the others still render.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use super::guard::{self, GuardDecision, RouteAccess};
use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Badge, Donation, Post, User};
use crate::services;
use crate::services::donations::DonationQuery;
use crate::state::auth::AuthContext;

pub const RECENT_LIMIT: u32 = 5;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardPage {
    pub recent_pets: Vec<Post>,
    pub recent_donations: Vec<Donation>,
    pub badges: Vec<Badge>,
}

impl DashboardPage {
    /// Open the dashboard for the current session.
    ///
    /// # Errors
    ///
    /// Returns the guard decision when the route may not render; no request
    /// is made in that case.
    pub async fn open(auth: &AuthContext) -> Result<Self, GuardDecision> {
        let decision = guard::check(RouteAccess::Protected, auth);
        match auth.user() {
            Some(user) if decision.allows() => Ok(Self::load(auth.api(), user).await),
            _ => Err(decision),
        }
    }

    pub async fn load(api: &ApiClient, user: &User) -> Self {
        let donations_query = DonationQuery { limit: Some(RECENT_LIMIT), ..DonationQuery::default() };
        let (pets, donations, badges) = tokio::join!(
            services::posts::recent(api, RECENT_LIMIT),
            services::donations::list(api, &donations_query),
            services::badges::for_user(api, &user.id),
        );
        Self {
            recent_pets: or_empty(pets, "recent pets"),
            recent_donations: or_empty(donations, "recent donations"),
            badges: or_empty(badges, "user badges"),
        }
    }

    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            pets: self.recent_pets.len(),
            donations: self.recent_donations.len(),
            badges: self.badges.len(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub pets: usize,
    pub donations: usize,
    pub badges: usize,
}

fn or_empty<T>(result: Result<Vec<T>, ApiError>, section: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, %section, "dashboard fetch failed");
        Vec::new()
    })
}
