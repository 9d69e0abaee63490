//! Auth-session state for the signed-in administrator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and actor-aware screens (self-delete guard, forced
//! re-login after a role change). Components reach it through the narrow
//! `AuthSession` capability in `util::auth`, never directly.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user, bearer token and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

impl AuthState {
    /// Identifier of the acting user, if signed in.
    #[must_use]
    pub fn actor_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Whether the acting user currently carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn sign_in(&mut self, token: String, user: User) {
        self.token = Some(token);
        self.user = Some(user);
        self.loading = false;
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
        self.loading = false;
    }
}
