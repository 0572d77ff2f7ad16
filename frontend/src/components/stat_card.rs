use leptos::prelude::*;

/// One figure in a dashboard `stats` row.
#[component]
pub fn StatCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] description: Option<Signal<String>>,
    /// daisyUI text colour class for the value, e.g. `text-warning`.
    #[prop(optional, into)] tone: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class=format!("stat-figure {}", tone)>{children()}</div>
            <div class="stat-title">{title}</div>
            <div class=format!("stat-value {}", tone)>{move || value.get()}</div>
            {description.map(|d| view! { <div class="stat-desc">{move || d.get()}</div> })}
        </div>
    }
}
