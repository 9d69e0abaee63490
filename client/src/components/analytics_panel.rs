//! Analytics pane of the read-only viewer.

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::state::viewer::Analytics;

#[component]
pub fn AnalyticsPanel(
    #[prop(into)] analytics: Signal<Analytics>,
    /// Selected group name; `None` means all groups.
    #[prop(into)]
    scope: Signal<Option<String>>,
    #[prop(into)] event_date: Signal<Option<NaiveDate>>,
    on_date: Callback<Option<NaiveDate>>,
) -> impl IntoView {
    let on_input = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        on_date.run(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok());
    };

    view! {
        <aside class="analytics-panel">
            <header class="analytics-panel__header">
                "Analytics"
                <span class="analytics-panel__scope">
                    {move || scope.get().unwrap_or_else(|| "All groups".to_owned())}
                </span>
            </header>
            <label class="analytics-panel__date">
                "Events on"
                <input
                    type="date"
                    prop:value=move || event_date.get().map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
                    on:change=on_input
                />
                <button
                    class="btn btn--small"
                    disabled=move || event_date.get().is_none()
                    on:click=move |_| on_date.run(None)
                >
                    "All dates"
                </button>
            </label>
            <dl class="analytics-panel__grid">
                <Metric label="Members" value=Signal::derive(move || analytics.get().total_members)/>
                <Metric label="Joins" value=Signal::derive(move || analytics.get().joins)/>
                <Metric label="Leaves" value=Signal::derive(move || analytics.get().leaves)/>
                <Metric label="Messages" value=Signal::derive(move || analytics.get().messages)/>
                <Metric label="Active senders" value=Signal::derive(move || analytics.get().active_users)/>
                <Metric label="Certificates" value=Signal::derive(move || analytics.get().certificates)/>
            </dl>
        </aside>
    }
}

#[component]
fn Metric(label: &'static str, value: Signal<i64>) -> impl IntoView {
    view! {
        <div class="metric">
            <dt class="metric__label">{label}</dt>
            <dd class="metric__value">{move || value.get()}</dd>
        </div>
    }
}
