//! Toast stack for transient notices.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call [`notify`] with the outcome of a fetch or mutation; the stack
//! renders the shared `NoticeState` and expires each entry after
//! `NOTICE_TTL_MS`.

use leptos::prelude::*;

use crate::state::notice::{Notice, NoticeState};

/// Queue `notice` and schedule its auto-dismissal.
pub fn notify(notices: RwSignal<NoticeState>, notice: Notice) {
    let Some(id) = notices.try_update(|n| n.push(notice)) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(crate::state::notice::NOTICE_TTL_MS).await;
        notices.update(|n| n.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

#[component]
pub fn NoticeStack() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-stack" aria-live="polite">
            {move || {
                notices
                    .get()
                    .items
                    .into_iter()
                    .map(|item| {
                        let id = item.id;
                        let class = format!("notice notice--{}", item.notice.kind.css_modifier());
                        let body = item.notice.body;
                        view! {
                            <div class=class role="status">
                                <div class="notice__text">
                                    <strong class="notice__title">{item.notice.title}</strong>
                                    {(!body.is_empty()).then(|| view! { <span class="notice__body">{body}</span> })}
                                </div>
                                <button
                                    class="notice__close"
                                    title="Dismiss"
                                    aria-label="Dismiss"
                                    on:click=move |_| notices.update(|n| n.dismiss(id))
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
