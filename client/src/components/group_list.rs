//! Group list pane of the read-only viewer.
//!
//! The control keeps its add and delete affordances so the layout matches the
//! owner's own screen; the viewer intercepts both and never sends a request.

use leptos::prelude::*;

use crate::state::viewer::{GroupListAction, GroupSummary};
use crate::util::format::format_timestamp;

#[component]
pub fn GroupList(
    #[prop(into)] groups: Signal<Vec<GroupSummary>>,
    #[prop(into)] selected: Signal<Option<i64>>,
    on_action: Callback<GroupListAction>,
) -> impl IntoView {
    view! {
        <aside class="group-list">
            <header class="group-list__header">
                <span>"Groups"</span>
                <button
                    class="btn btn--small"
                    title="Add group"
                    on:click=move |_| on_action.run(GroupListAction::Add)
                >
                    "+"
                </button>
            </header>
            <button
                class="group-list__item group-list__item--all"
                class:group-list__item--active=move || selected.get().is_none()
                on:click=move |_| on_action.run(GroupListAction::Select(None))
            >
                "All groups"
            </button>
            {move || {
                let current = selected.get();
                groups
                    .get()
                    .into_iter()
                    .map(|group| {
                        let id = group.id;
                        let time = group.last_message_time.as_deref().map(format_timestamp).unwrap_or_default();
                        view! {
                            <div
                                class="group-list__item"
                                class:group-list__item--active={current == Some(id)}
                                on:click=move |_| on_action.run(GroupListAction::Select(Some(id)))
                            >
                                <div class="group-list__row">
                                    <span class="group-list__name">{group.name}</span>
                                    <span class="group-list__time">{time}</span>
                                </div>
                                <div class="group-list__row">
                                    <span class="group-list__preview">
                                        {group.last_message.unwrap_or_else(|| "No messages yet".to_owned())}
                                    </span>
                                    {(group.unread_count > 0)
                                        .then(|| view! { <span class="group-list__unread">{group.unread_count}</span> })}
                                    <button
                                        class="group-list__delete"
                                        title="Delete group"
                                        aria-label="Delete group"
                                        on:click=move |ev: leptos::ev::MouseEvent| {
                                            ev.stop_propagation();
                                            on_action.run(GroupListAction::Delete(id));
                                        }
                                    >
                                        "✕"
                                    </button>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </aside>
    }
}
