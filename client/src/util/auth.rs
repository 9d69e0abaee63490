//! Shared auth UI helpers and the `AuthSession` capability.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical unauthenticated redirect behavior and
//! reach the signed-in actor only through [`AuthSession`], a `Copy` handle
//! provided via context. The bearer token lives in `localStorage` so a reload
//! can restore the session through `/api/auth/me`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::api::HttpApi;
use crate::net::types::User;
use crate::state::auth::AuthState;
use crate::state::directory::Followup;

#[cfg(feature = "hydrate")]
const TOKEN_STORAGE_KEY: &str = "admin_console_token";

/// Narrow handle over the reactive auth state.
#[derive(Clone, Copy)]
pub struct AuthSession {
    state: RwSignal<AuthState>,
}

impl AuthSession {
    #[must_use]
    pub fn new(state: RwSignal<AuthState>) -> Self {
        Self { state }
    }

    /// Identifier of the acting user (tracked).
    pub fn actor_id(&self) -> Option<i64> {
        self.state.with(AuthState::actor_id)
    }

    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    /// API client bound to the current token.
    pub fn api(&self) -> HttpApi {
        HttpApi::new(self.token())
    }

    pub fn sign_in(&self, token: String, user: User) {
        store_token(&token);
        self.state.update(|s| s.sign_in(token, user));
    }

    /// Forget the token locally and in storage.
    pub fn logout(&self) {
        clear_token();
        self.state.update(AuthState::clear);
    }

    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }
}

/// Whether a route guard should send the visitor to `/login`.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let navigate = navigate.clone();
    Effect::new(move || {
        if auth.with(should_redirect_unauth) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Restore a persisted session on startup.
///
/// Marks auth as loading while `/api/auth/me` validates the stored token; an
/// invalid token is discarded.
pub fn restore_session(session: AuthSession) {
    #[cfg(feature = "hydrate")]
    {
        let Some(token) = load_token() else {
            return;
        };
        session.state.update(|s| s.loading = true);
        leptos::task::spawn_local(async move {
            use crate::net::api::AdminApi as _;

            match HttpApi::new(Some(token.clone())).current_user().await {
                Ok(user) => session.state.update(|s| s.sign_in(token, user)),
                Err(e) => {
                    log::info!("stored session rejected: {e}");
                    session.logout();
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}

/// Carry out a controller's followup: wait, purge the session, go to login.
pub fn run_followup(session: AuthSession, followup: Followup) {
    #[cfg(feature = "hydrate")]
    {
        let Followup::EndSession { after } = followup;
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(after).await;
            session.logout();
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, followup);
    }
}

fn store_token(token: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(TOKEN_STORAGE_KEY, token);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

#[cfg(feature = "hydrate")]
fn load_token() -> Option<String> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
    storage.get_item(TOKEN_STORAGE_KEY).ok().flatten().filter(|t| !t.is_empty())
}

fn clear_token() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}
