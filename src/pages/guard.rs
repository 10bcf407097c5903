//! Route guard for protected and admin-only pages.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::types::User;
use crate::state::auth::AuthContext;

pub const LOGIN_ROUTE: &str = "/login";

/// Who may open a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Requires a signed-in user.
    Protected,
    /// Requires a signed-in staff user.
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The stored session is still being checked; show a spinner.
    Pending,
    Render,
    Redirect(&'static str),
    /// Signed in but not staff.
    AccessDenied,
}

impl GuardDecision {
    #[must_use]
    pub fn allows(self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Decide what a route shows for the given session state.
///
/// Nothing redirects while `is_loading` is set, so a stored session is never
/// bounced before `init` has revalidated it.
#[must_use]
pub fn decide(access: RouteAccess, is_loading: bool, user: Option<&User>) -> GuardDecision {
    if access == RouteAccess::Public {
        return GuardDecision::Render;
    }
    if is_loading {
        return GuardDecision::Pending;
    }
    match user {
        None => GuardDecision::Redirect(LOGIN_ROUTE),
        Some(user) if access == RouteAccess::Admin && !user.is_staff => GuardDecision::AccessDenied,
        Some(_) => GuardDecision::Render,
    }
}

#[must_use]
pub fn check(access: RouteAccess, auth: &AuthContext) -> GuardDecision {
    decide(access, auth.is_loading(), auth.user())
}
