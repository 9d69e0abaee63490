//! User Directory table.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders `DirectoryState.users` with per-row role and delete actions. Rows
//! with a request in flight disable their own buttons only; the acting user's
//! row has no delete button.

use leptos::prelude::*;

use crate::state::directory::DirectoryState;
use crate::state::gallery::viewer_path;
use crate::util::format::format_day;

#[component]
pub fn UserTable(
    directory: RwSignal<DirectoryState>,
    #[prop(into)] actor_id: Signal<Option<i64>>,
    on_toggle: Callback<i64>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    view! {
        <Show
            when=move || !directory.with(|d| d.users.is_empty())
            fallback=move || {
                view! {
                    <div class="user-table__empty">
                        {move || if directory.with(|d| d.loading) { "Loading users..." } else { "No users found." }}
                    </div>
                }
            }
        >
            <div class="user-table__wrap">
                <table class="user-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Username"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"WhatsApp"</th>
                            <th>"Created"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let state = directory.get();
                            let actor = actor_id.get();
                            state
                                .users
                                .iter()
                                .map(|user| {
                                    let id = user.id;
                                    let is_self = actor == Some(id);
                                    let updating = state.updating.contains(&id);
                                    let deleting = state.deleting.contains(&id);
                                    let role_label = if user.is_admin { "Admin" } else { "User" };
                                    let toggle_label = match (updating, user.is_admin) {
                                        (true, _) => "Updating...",
                                        (false, true) => "Revoke admin",
                                        (false, false) => "Make admin",
                                    };
                                    let created = user.created_at.as_deref().map(format_day).unwrap_or_default();
                                    view! {
                                        <tr class:user-table__row--self=is_self>
                                            <td class="user-table__mono">{id}</td>
                                            <td>
                                                <a class="user-table__link" href=viewer_path(id)>{user.username.clone()}</a>
                                                {is_self.then(|| view! { <span class="user-table__you">" (you)"</span> })}
                                            </td>
                                            <td>{user.email.clone()}</td>
                                            <td>
                                                <span class="badge" class:badge--admin=user.is_admin>{role_label}</span>
                                            </td>
                                            <td>
                                                <span
                                                    class="status-dot"
                                                    class:status-dot--on=user.whatsapp_connected
                                                    title={if user.whatsapp_connected { "Connected" } else { "Not connected" }}
                                                ></span>
                                            </td>
                                            <td>{created}</td>
                                            <td class="user-table__actions">
                                                <button
                                                    class="btn btn--small"
                                                    disabled={updating || deleting}
                                                    on:click=move |_| on_toggle.run(id)
                                                >
                                                    {toggle_label}
                                                </button>
                                                {(!is_self)
                                                    .then(|| {
                                                        view! {
                                                            <button
                                                                class="btn btn--small btn--danger"
                                                                disabled={updating || deleting}
                                                                on:click=move |_| on_delete.run(id)
                                                            >
                                                                {if deleting { "Deleting..." } else { "Delete" }}
                                                            </button>
                                                        }
                                                    })}
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>
        </Show>
    }
}
