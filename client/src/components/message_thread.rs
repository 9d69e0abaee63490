//! Message thread pane of the read-only viewer.

use leptos::prelude::*;

use crate::net::types::Message;
use crate::util::format::format_timestamp;

/// Chronological thread of the selected group, or a hint when none is.
#[component]
pub fn MessageThread(
    #[prop(into)] messages: Signal<Vec<Message>>,
    #[prop(into)] group_name: Signal<Option<String>>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <section class="message-thread">
            <header class="message-thread__header">
                {move || group_name.get().unwrap_or_else(|| "Select a group".to_owned())}
            </header>
            <div class="message-thread__body">
                {move || {
                    if group_name.get().is_none() {
                        return view! {
                            <p class="message-thread__empty">"Pick a group on the left to read its messages."</p>
                        }
                            .into_any();
                    }
                    if loading.get() {
                        return view! { <p class="message-thread__empty">"Loading messages..."</p> }.into_any();
                    }
                    let items = messages.get();
                    if items.is_empty() {
                        return view! { <p class="message-thread__empty">"No messages in this group."</p> }.into_any();
                    }
                    items
                        .into_iter()
                        .map(|m| {
                            view! {
                                <div class="message">
                                    <div class="message__meta">
                                        <span class="message__sender">{m.sender}</span>
                                        <span class="message__time">{format_timestamp(&m.timestamp)}</span>
                                    </div>
                                    <p class="message__content">{m.content}</p>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
            <footer class="message-thread__footer">"Read-only view. Sending is disabled."</footer>
        </section>
    }
}
