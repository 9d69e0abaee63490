//! Avatar tile for the connected-user gallery.

use leptos::prelude::*;

use crate::net::types::User;
use crate::state::gallery::viewer_path;
use crate::util::color::{avatar_color, initials};

/// Clickable tile linking to the read-only viewer for `user`.
#[component]
pub fn UserTile(user: User) -> impl IntoView {
    let avatar_style = format!("background:{};", avatar_color(user.id));
    let avatar_text = initials(&user.username);
    let title = user.email.clone();

    view! {
        <a class="user-tile" href=viewer_path(user.id) title=title>
            <span class="user-tile__avatar" style=avatar_style>{avatar_text}</span>
            <span class="user-tile__name">{user.username}</span>
            <span class="user-tile__email">{user.email}</span>
            <span class="user-tile__status">
                <span class="status-dot status-dot--on"></span>
                "Connected"
            </span>
        </a>
    }
}
