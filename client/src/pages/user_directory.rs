//! User Directory page: list, role toggle, delete and self-elevation.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. All rules live in
//! `state::directory`; this page wires them to clicks, spawns the requests and
//! routes each outcome to the notice stack and, when required, the forced
//! session reset.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::nav_bar::NavBar;
use crate::components::notice_stack::notify;
use crate::components::user_table::UserTable;
use crate::state::directory::{DirectoryState, Outcome};
use crate::state::notice::NoticeState;
use crate::util::auth::{AuthSession, install_unauth_redirect};

#[component]
pub fn UserDirectoryPage() -> impl IntoView {
    let session = expect_context::<AuthSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let directory = RwSignal::new(DirectoryState::default());
    let navigate = use_navigate();

    install_unauth_redirect(session.state(), navigate);

    let report = move |outcome: Outcome| {
        notify(notices, outcome.notice);
        if let Some(followup) = outcome.followup {
            crate::util::auth::run_followup(session, followup);
        }
    };

    let load = move || {
        if !directory.try_update(DirectoryState::begin_load).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::AdminApi as _;

            let result = session.api().list_users().await;
            if let Some(Some(notice)) = directory.try_update(|d| d.finish_load(result)) {
                notify(notices, notice);
            }
        });
    };

    // Fetch once the session is known.
    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get() || session.user().is_none() {
            return;
        }
        requested.set(true);
        load();
    });

    let on_toggle = Callback::new(move |user_id: i64| {
        if let Some(Err(rejection)) = directory.try_update(|d| d.request_toggle_admin(user_id)) {
            notify(notices, rejection.notice());
        }
    });

    let on_delete = Callback::new(move |user_id: i64| {
        let actor = session.actor_id();
        if let Some(Err(rejection)) = directory.try_update(|d| d.request_delete(user_id, actor)) {
            notify(notices, rejection.notice());
        }
    });

    let on_cancel = Callback::new(move |()| directory.update(DirectoryState::cancel));

    let on_confirm = Callback::new(move |()| {
        let Some(Some(mutation)) = directory.try_update(DirectoryState::confirm) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::state::directory::execute(&session.api(), mutation).await;
            let actor = session.actor_id();
            if let Some(outcome) = directory.try_update(|d| d.finish(mutation, actor, result)) {
                report(outcome);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (mutation, report);
    });

    let on_elevate = move |_| {
        if !directory.try_update(DirectoryState::begin_elevate).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::AdminApi as _;

            let result = session.api().make_me_admin().await;
            if let Some(outcome) = directory.try_update(|d| d.finish_elevate(result)) {
                report(outcome);
            }
        });
    };

    let summary = move || directory.with(DirectoryState::summary);
    let is_admin = move || session.state().with(|s| s.is_admin());

    view! {
        <Show
            when=move || session.user().is_some()
            fallback=move || {
                view! {
                    <div class="directory-page">
                        <p>{move || if session.state().with(|s| s.loading) { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="directory-page">
                <NavBar/>
                <header class="directory-page__header">
                    <h1>"Users"</h1>
                    <span class="directory-page__counts">
                        {move || {
                            let s = summary();
                            format!("{} users · {} admins · {} connected", s.total, s.admins, s.connected)
                        }}
                    </span>
                    <span class="toolbar__spacer"></span>
                    <Show when=move || !is_admin()>
                        <button
                            class="btn btn--primary"
                            disabled=move || directory.with(|d| d.elevating)
                            on:click=on_elevate
                        >
                            {move || if directory.with(|d| d.elevating) { "Elevating..." } else { "Make me admin" }}
                        </button>
                    </Show>
                    <button class="btn" disabled=move || directory.with(|d| d.loading) on:click=move |_| load()>
                        "Refresh"
                    </button>
                </header>
                <UserTable
                    directory=directory
                    actor_id=Signal::derive(move || session.actor_id())
                    on_toggle=on_toggle
                    on_delete=on_delete
                />
                {move || {
                    directory
                        .with(|d| d.pending.clone())
                        .map(|pending| {
                            view! {
                                <ConfirmDialog
                                    prompt=pending.prompt(session.actor_id())
                                    on_confirm=on_confirm
                                    on_cancel=on_cancel
                                />
                            }
                        })
                }}
            </div>
        </Show>
    }
}
