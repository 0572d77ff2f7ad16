use crate::components::icons::{AlertCircle, CheckCircle};
use leptos::prelude::*;

/// Inline feedback under a form or above a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

#[component]
pub fn FlashMessage(flash: ReadSignal<Option<Flash>>) -> impl IntoView {
    move || {
        flash.get().map(|flash| match flash {
            Flash::Success(message) => view! {
                <div role="alert" class="alert alert-success text-sm py-2">
                    <CheckCircle attr:class="h-5 w-5 shrink-0" />
                    <span>{message}</span>
                </div>
            }
            .into_any(),
            Flash::Error(message) => view! {
                <div role="alert" class="alert alert-error text-sm py-2">
                    <AlertCircle attr:class="h-5 w-5 shrink-0" />
                    <span>{message}</span>
                </div>
            }
            .into_any(),
        })
    }
}

/// Quiet note shown when a background load failed and defaults are on screen.
#[component]
pub fn FetchNotice(
    #[prop(into)] error: Signal<Option<String>>,
    what: &'static str,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="alert alert-warning alert-soft text-sm py-2">
                <AlertCircle attr:class="h-4 w-4 shrink-0" />
                <span>{format!("Could not load {}. Showing what is available.", what)}</span>
            </div>
        </Show>
    }
}
