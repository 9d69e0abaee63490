//! Modal confirmation step shared by every destructive or role-changing action.

use leptos::prelude::*;

use crate::state::directory::ConfirmPrompt;

/// Backdrop + dialog. Clicking the backdrop cancels.
#[component]
pub fn ConfirmDialog(prompt: ConfirmPrompt, on_confirm: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let confirm_class = if prompt.destructive { "btn btn--danger" } else { "btn btn--primary" };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" role="alertdialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{prompt.title}</h2>
                <p class:dialog__danger=prompt.destructive>{prompt.body}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class=confirm_class on:click=move |_| on_confirm.run(())>
                        {prompt.confirm_label}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Blocking explanation with a single dismiss button.
#[component]
pub fn InfoDialog(title: &'static str, body: &'static str, on_close: Callback<()>) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" role="alertdialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{title}</h2>
                <p>{body}</p>
                <div class="dialog__actions">
                    <button class="btn btn--primary" on:click=move |_| on_close.run(())>
                        "OK"
                    </button>
                </div>
            </div>
        </div>
    }
}
