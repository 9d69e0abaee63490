//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::notice_stack::NoticeStack;
use crate::pages::{
    connected_users::ConnectedUsersPage, login::LoginPage, user_directory::UserDirectoryPage,
    user_viewer::UserViewerPage,
};
use crate::state::auth::AuthState;
use crate::state::notice::NoticeState;
use crate::util::auth::{AuthSession, restore_session};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth and notice contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let notices = RwSignal::new(NoticeState::default());
    let session = AuthSession::new(auth);

    provide_context(auth);
    provide_context(notices);
    provide_context(session);

    restore_session(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/admin-console.css"/>
        <Title text="Admin Console"/>

        <Router>
            <NoticeStack/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=UserDirectoryPage/>
                <Route path=StaticSegment("connected") view=ConnectedUsersPage/>
                <Route path=(StaticSegment("users"), ParamSegment("id")) view=UserViewerPage/>
            </Routes>
        </Router>
    }
}
