//! Connected-User Gallery page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_bar::NavBar;
use crate::components::notice_stack::notify;
use crate::components::user_tile::UserTile;
use crate::state::gallery::GalleryState;
use crate::state::notice::NoticeState;
use crate::util::auth::{AuthSession, install_unauth_redirect};

/// Avatar grid of every user with an active WhatsApp link. Read-only.
#[component]
pub fn ConnectedUsersPage() -> impl IntoView {
    let session = expect_context::<AuthSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let gallery = RwSignal::new(GalleryState::default());
    let navigate = use_navigate();

    install_unauth_redirect(session.state(), navigate);

    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get() || session.user().is_none() {
            return;
        }
        requested.set(true);
        gallery.update(GalleryState::begin_load);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::AdminApi as _;

            let result = session.api().list_users().await;
            if let Some(Some(notice)) = gallery.try_update(|g| g.finish_load(result)) {
                notify(notices, notice);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = notices;
    });

    let connected = move || gallery.with(GalleryState::connected);

    view! {
        <div class="gallery-page">
            <NavBar/>
            <header class="gallery-page__header">
                <h1>"Connected users"</h1>
                <span class="gallery-page__count">{move || format!("{} connected", connected().len())}</span>
            </header>
            <Show when=move || gallery.with(|g| g.error.is_some())>
                <p class="gallery-page__error">{move || gallery.with(|g| g.error.clone()).unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !gallery.with(|g| g.loading)
                fallback=move || view! { <p>"Loading users..."</p> }
            >
                <Show
                    when=move || !connected().is_empty()
                    fallback=move || view! { <p class="gallery-page__empty">"No users are connected right now."</p> }
                >
                    <div class="gallery-page__grid">
                        {move || connected().into_iter().map(|user| view! { <UserTile user=user/> }).collect_view()}
                    </div>
                </Show>
            </Show>
        </div>
    }
}
