//! User Directory state: cached user list, per-row mutations, confirmations.
//!
//! SYSTEM CONTEXT
//! ==============
//! `pages::user_directory` owns one `RwSignal<DirectoryState>`. Every mutating
//! action runs in three steps so the rules stay testable without a browser:
//!
//! 1. `request_*` validates locally and parks a [`PendingAction`] for the
//!    confirmation dialog (self-delete is rejected here, before any request).
//! 2. `confirm` marks the row in flight and yields a [`Mutation`], which the
//!    page hands to [`execute`].
//! 3. `finish` reconciles the cache to the server-confirmed value, always
//!    clears the in-flight marker, and reports a notice plus an optional
//!    [`Followup`].
//!
//! In-flight markers are per row: a pending toggle on one user never blocks
//! actions on another.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use std::collections::HashSet;
use std::time::Duration;

use crate::net::api::{AdminApi, ApiResult};
use crate::net::types::User;
use crate::state::notice::Notice;

/// Delay before a forced logout so the confirmation notice stays readable.
pub const SESSION_RESET_DELAY: Duration = Duration::from_secs(2);

/// Action awaiting confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    ToggleAdmin { user_id: i64, username: String, grant: bool },
    Delete { user_id: i64, username: String },
}

/// Wording for the confirmation dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub body: String,
    pub confirm_label: &'static str,
    pub destructive: bool,
}

impl PendingAction {
    /// Build the dialog wording. Revoking one's own role warns about the
    /// forced logout that follows.
    #[must_use]
    pub fn prompt(&self, actor_id: Option<i64>) -> ConfirmPrompt {
        match self {
            Self::ToggleAdmin { user_id, username, grant: true } => ConfirmPrompt {
                title: "Grant admin access".to_owned(),
                body: format!("Give {username} (ID {user_id}) full administrative access?"),
                confirm_label: "Grant",
                destructive: false,
            },
            Self::ToggleAdmin { user_id, username, grant: false } => {
                let body = if actor_id == Some(*user_id) {
                    "You are about to remove your own admin access. You will be signed out \
                     and lose access to this dashboard."
                        .to_owned()
                } else {
                    format!("Remove administrative access from {username} (ID {user_id})?")
                };
                ConfirmPrompt {
                    title: "Revoke admin access".to_owned(),
                    body,
                    confirm_label: "Revoke",
                    destructive: true,
                }
            }
            Self::Delete { user_id, username } => ConfirmPrompt {
                title: "Delete user".to_owned(),
                body: format!(
                    "Permanently delete {username} (ID {user_id})? This cannot be undone. All of \
                     their messages, events and linked WhatsApp sessions will be removed."
                ),
                confirm_label: "Delete",
                destructive: true,
            },
        }
    }

    fn user_id(&self) -> i64 {
        match self {
            Self::ToggleAdmin { user_id, .. } | Self::Delete { user_id, .. } => *user_id,
        }
    }
}

/// Confirmed server call for one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    SetAdmin { user_id: i64, is_admin: bool },
    Delete { user_id: i64 },
}

/// Irreversible side effect scheduled after a successful call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Followup {
    /// Purge the local session and redirect to login once `after` elapses.
    EndSession { after: Duration },
}

/// Result of reconciling a mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Notice,
    pub followup: Option<Followup>,
}

/// Local refusal of an action; no request is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("You cannot delete your own account.")]
    SelfDelete,
    #[error("An action for this user is already in progress.")]
    Busy,
    #[error("That user is no longer in the list.")]
    UnknownUser,
}

impl Rejection {
    #[must_use]
    pub fn notice(self) -> Notice {
        Notice::error("Action not allowed", self.to_string())
    }
}

/// Header counts shown above the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectorySummary {
    pub total: usize,
    pub admins: usize,
    pub connected: usize,
}

#[derive(Clone, Debug, Default)]
pub struct DirectoryState {
    pub users: Vec<User>,
    pub loading: bool,
    pub loaded: bool,
    /// Rows with a role change in flight.
    pub updating: HashSet<i64>,
    /// Rows with a deletion in flight.
    pub deleting: HashSet<i64>,
    pub pending: Option<PendingAction>,
    /// Self-elevation call in flight.
    pub elevating: bool,
}

impl DirectoryState {
    #[must_use]
    pub fn summary(&self) -> DirectorySummary {
        DirectorySummary {
            total: self.users.len(),
            admins: self.users.iter().filter(|u| u.is_admin).count(),
            connected: self.users.iter().filter(|u| u.whatsapp_connected).count(),
        }
    }

    #[must_use]
    pub fn is_busy(&self, user_id: i64) -> bool {
        self.updating.contains(&user_id) || self.deleting.contains(&user_id)
    }

    fn find(&self, user_id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    // =========================================================================
    // FETCH
    // =========================================================================

    /// Mark the list as loading. Returns `false` if a load is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Replace the cache on success; keep the last-known list on failure.
    pub fn finish_load(&mut self, result: ApiResult<Vec<User>>) -> Option<Notice> {
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                self.loaded = true;
                None
            }
            Err(err) => Some(Notice::error("Failed to load users", err.notice_text())),
        }
    }

    // =========================================================================
    // ROLE TOGGLE + DELETE
    // =========================================================================

    /// Park a grant/revoke confirmation framed by the row's current flag.
    ///
    /// # Errors
    ///
    /// Rejects unknown or busy rows.
    pub fn request_toggle_admin(&mut self, user_id: i64) -> Result<(), Rejection> {
        let user = self.find(user_id).ok_or(Rejection::UnknownUser)?;
        if self.is_busy(user_id) {
            return Err(Rejection::Busy);
        }
        self.pending = Some(PendingAction::ToggleAdmin {
            user_id,
            username: user.username.clone(),
            grant: !user.is_admin,
        });
        Ok(())
    }

    /// Park a destructive delete confirmation.
    ///
    /// # Errors
    ///
    /// Rejects the acting user's own row before anything else, then unknown or
    /// busy rows.
    pub fn request_delete(&mut self, user_id: i64, actor_id: Option<i64>) -> Result<(), Rejection> {
        if actor_id == Some(user_id) {
            return Err(Rejection::SelfDelete);
        }
        let user = self.find(user_id).ok_or(Rejection::UnknownUser)?;
        if self.is_busy(user_id) {
            return Err(Rejection::Busy);
        }
        self.pending = Some(PendingAction::Delete { user_id, username: user.username.clone() });
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Accept the parked confirmation, mark its row in flight and return the
    /// call to make. `None` if nothing is parked or the row became busy.
    pub fn confirm(&mut self) -> Option<Mutation> {
        let pending = self.pending.take()?;
        if self.is_busy(pending.user_id()) {
            return None;
        }
        let mutation = match pending {
            PendingAction::ToggleAdmin { user_id, grant, .. } => {
                self.updating.insert(user_id);
                Mutation::SetAdmin { user_id, is_admin: grant }
            }
            PendingAction::Delete { user_id, .. } => {
                self.deleting.insert(user_id);
                Mutation::Delete { user_id }
            }
        };
        Some(mutation)
    }

    /// Reconcile a finished mutation against the cache.
    ///
    /// Only a confirmed success touches the cache, and only the target row.
    /// The row's in-flight marker is cleared whatever the result.
    pub fn finish(&mut self, mutation: Mutation, actor_id: Option<i64>, result: ApiResult<()>) -> Outcome {
        match mutation {
            Mutation::SetAdmin { user_id, is_admin } => {
                self.updating.remove(&user_id);
                if let Err(err) = result {
                    return Outcome { notice: Notice::error("Role update failed", err.notice_text()), followup: None };
                }
                let mut username = format!("User {user_id}");
                if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
                    user.is_admin = is_admin;
                    username.clone_from(&user.username);
                }
                if !is_admin && actor_id == Some(user_id) {
                    return Outcome {
                        notice: Notice::warning(
                            "Admin access removed",
                            "You revoked your own admin access. Signing you out...",
                        ),
                        followup: Some(Followup::EndSession { after: SESSION_RESET_DELAY }),
                    };
                }
                let notice = if is_admin {
                    Notice::success("Admin access granted", format!("{username} is now an admin."))
                } else {
                    Notice::success("Admin access revoked", format!("{username} is no longer an admin."))
                };
                Outcome { notice, followup: None }
            }
            Mutation::Delete { user_id } => {
                self.deleting.remove(&user_id);
                match result {
                    Ok(()) => {
                        self.users.retain(|u| u.id != user_id);
                        Outcome {
                            notice: Notice::success("User deleted", format!("User {user_id} and their data were removed.")),
                            followup: None,
                        }
                    }
                    Err(err) => Outcome { notice: Notice::error("Delete failed", err.notice_text()), followup: None },
                }
            }
        }
    }

    // =========================================================================
    // SELF-ELEVATION
    // =========================================================================

    /// Mark self-elevation in flight. Returns `false` if already running.
    pub fn begin_elevate(&mut self) -> bool {
        if self.elevating {
            return false;
        }
        self.elevating = true;
        true
    }

    /// A successful elevation always ends the session so the new role is
    /// picked up on the next login.
    pub fn finish_elevate(&mut self, result: ApiResult<Option<String>>) -> Outcome {
        self.elevating = false;
        match result {
            Ok(message) => Outcome {
                notice: Notice::success(
                    message.unwrap_or_else(|| "You are now an admin.".to_owned()),
                    "Signing you out so the new role takes effect...",
                ),
                followup: Some(Followup::EndSession { after: SESSION_RESET_DELAY }),
            },
            Err(err) => Outcome { notice: Notice::error("Could not make you admin", err.notice_text()), followup: None },
        }
    }
}

/// Issue the server call for a confirmed mutation.
pub async fn execute<A: AdminApi>(api: &A, mutation: Mutation) -> ApiResult<()> {
    match mutation {
        Mutation::SetAdmin { user_id, is_admin } => api.set_admin(user_id, is_admin).await,
        Mutation::Delete { user_id } => api.delete_user(user_id).await,
    }
}
