//! Top navigation for the admin screens.

use leptos::prelude::*;

use crate::util::auth::AuthSession;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<AuthSession>();

    let on_logout = move |_| {
        session.logout();
        #[cfg(feature = "hydrate")]
        {
            if let Some(w) = web_sys::window() {
                let _ = w.location().set_href("/login");
            }
        }
    };

    view! {
        <header class="nav-bar toolbar">
            <span class="toolbar__title">"Admin"</span>
            <span class="toolbar__divider" aria-hidden="true"></span>
            <a class="nav-bar__link" href="/">"Users"</a>
            <a class="nav-bar__link" href="/connected">"Connected"</a>
            <span class="toolbar__spacer"></span>
            <span class="toolbar__self">
                {move || session.user().map(|u| u.username).unwrap_or_default()}
            </span>
            <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                "Logout"
            </button>
        </header>
    }
}
