//! Connected-User Gallery state.
//!
//! A pure read/filter view over the user list: no mutation exists here.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use crate::net::api::ApiResult;
use crate::net::types::User;
use crate::state::notice::Notice;

#[derive(Clone, Debug, Default)]
pub struct GalleryState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl GalleryState {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Store the fetched list; on failure keep the previous list.
    pub fn finish_load(&mut self, result: ApiResult<Vec<User>>) -> Option<Notice> {
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                self.error = None;
                None
            }
            Err(err) => {
                let text = err.notice_text();
                self.error = Some(text.clone());
                Some(Notice::error("Failed to load users", text))
            }
        }
    }

    /// Users with an active WhatsApp link, in fetch order.
    #[must_use]
    pub fn connected(&self) -> Vec<User> {
        connected_users(&self.users)
    }
}

/// Subset of `users` whose session-linked flag is set, order preserved.
#[must_use]
pub fn connected_users(users: &[User]) -> Vec<User> {
    users.iter().filter(|u| u.whatsapp_connected).cloned().collect()
}

/// Route of the read-only viewer for `user_id`.
#[must_use]
pub fn viewer_path(user_id: i64) -> String {
    format!("/users/{user_id}")
}
