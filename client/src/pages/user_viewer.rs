//! Read-only viewer for another user's groups, messages and analytics.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route parameter feeds `ViewerState::open`. A planner effect re-runs on
//! every state change, asks `ViewerState::plan` which keys are now wanted and
//! spawns one request per key; arrivals go back through `apply`, which drops
//! anything superseded in the meantime.
//!
//! The planner marks slots in flight without notifying, otherwise it would
//! retrigger itself.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::analytics_panel::AnalyticsPanel;
use crate::components::confirm_dialog::InfoDialog;
use crate::components::group_list::GroupList;
use crate::components::message_thread::MessageThread;
use crate::components::nav_bar::NavBar;
use crate::state::viewer::{GroupListAction, ViewerOptions, ViewerPhase, ViewerState, parse_target_id};
use crate::util::auth::{AuthSession, install_unauth_redirect};

#[component]
pub fn UserViewerPage() -> impl IntoView {
    let session = expect_context::<AuthSession>();
    let options = use_context::<ViewerOptions>().unwrap_or_default();
    let viewer = RwSignal::new(ViewerState::new(options));
    let params = use_params_map();
    let navigate = use_navigate();

    install_unauth_redirect(session.state(), navigate);

    Effect::new(move || {
        let target = parse_target_id(params.with(|p| p.get("id")).as_deref());
        let today = chrono::Local::now().date_naive();
        viewer.update(|v| v.open(target, today));
    });

    Effect::new(move || {
        viewer.track();
        if session.user().is_none() {
            return;
        }
        let keys = viewer.try_update_untracked(ViewerState::plan).unwrap_or_default();
        for key in keys {
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let payload = crate::state::viewer::fetch(&session.api(), key).await;
                viewer.update(|v| {
                    if !v.apply(key, payload) {
                        log::debug!("dropped stale response for {key:?}");
                    }
                });
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = key;
        }
    });

    let on_action = Callback::new(move |action: GroupListAction| {
        viewer.update(|v| {
            v.handle_group_action(action);
        });
    });
    let on_date = Callback::new(move |date: Option<chrono::NaiveDate>| viewer.update(|v| v.set_event_date(date)));
    let on_dismiss = Callback::new(move |()| viewer.update(ViewerState::dismiss_blocked));

    let selected = Signal::derive(move || viewer.with(|v| v.selected_group));
    let summaries = Signal::derive(move || viewer.with(ViewerState::group_summaries));
    let group_name = Signal::derive(move || {
        let id = selected.get()?;
        summaries.with(|groups| groups.iter().find(|g| g.id == id).map(|g| g.name.clone()))
    });
    let thread = Signal::derive(move || viewer.with(ViewerState::thread));
    let thread_loading = Signal::derive(move || {
        viewer.with(|v| v.selected_group.is_some() && v.thread.value().is_none() && v.thread.error().is_none())
    });
    let analytics = Signal::derive(move || viewer.with(ViewerState::analytics));
    let event_date = Signal::derive(move || viewer.with(|v| v.event_date));

    let phase = Memo::new(move |_| viewer.with(ViewerState::phase));

    let identity = move || {
        viewer.with(|v| match v.identity() {
            Some(user) => format!("{} ({})", user.username, user.email),
            None => v.target.map(|id| format!("User {id}")).unwrap_or_default(),
        })
    };

    view! {
        <div class="viewer-page">
            <NavBar/>
            <header class="viewer-page__header">
                <a class="btn btn--small" href="/">"← Back"</a>
                <h1>{identity}</h1>
                <span class="badge badge--readonly">"Read-only"</span>
            </header>
            {move || match phase.get() {
                ViewerPhase::Disabled => {
                    view! { <p class="viewer-page__empty">"No valid user selected."</p> }.into_any()
                }
                ViewerPhase::LoadingGroups => view! { <p class="viewer-page__empty">"Loading groups..."</p> }.into_any(),
                ViewerPhase::Failed(message) => {
                    view! { <p class="viewer-page__error">{format!("Failed to load groups: {message}")}</p> }
                        .into_any()
                }
                ViewerPhase::Empty => {
                    view! { <p class="viewer-page__empty">"This user has no groups yet."</p> }.into_any()
                }
                ViewerPhase::Ready => {
                    view! {
                        <div class="viewer-page__panes">
                            <GroupList groups=summaries selected=selected on_action=on_action/>
                            <MessageThread messages=thread group_name=group_name loading=thread_loading/>
                            <AnalyticsPanel
                                analytics=analytics
                                scope=group_name
                                event_date=event_date
                                on_date=on_date
                            />
                        </div>
                    }
                        .into_any()
                }
            }}
            {move || {
                viewer
                    .with(|v| v.blocked)
                    .map(|body| view! { <InfoDialog title="Read-only view" body=body on_close=on_dismiss/> })
            }}
        </div>
    }
}
