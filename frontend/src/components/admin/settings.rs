use crate::api::FertiflowApi;
use crate::auth::{use_api, use_auth};
use crate::components::icons::*;
use crate::components::notice::{FetchNotice, Flash, FlashMessage};
use crate::error::{FormError, parse_positive};
use crate::resource::{FetchState, Remote};
use fertiflow_shared::RateRecord;
use fertiflow_shared::date::{DateStyle, format_date};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

const UPDATE_FAILED: &str = "Failed to update rate";
const RATE_UPDATED: &str = "Rate updated successfully!";
const FLASH_TTL: Duration = Duration::from_secs(3);
const HISTORY_LIMIT: usize = 5;

/// Validates and stores a new rate, returning the value now in effect.
pub async fn submit_rate(
    api: &FertiflowApi,
    token: Option<&str>,
    rate_input: &str,
) -> Result<f64, FormError> {
    let value = parse_positive(rate_input, "rate")?;
    api.update_rate(token, value).await?;
    log::info!("[Rate] set to {}", value);
    Ok(value)
}

/// Stores a new rate, shows it as current and reloads `history`. A rejected
/// rate leaves both as they were.
pub async fn update_rate_and_reload(
    api: &FertiflowApi,
    token: Option<&str>,
    rate_input: &str,
    rate: Remote<f64>,
    history: Remote<Vec<RateRecord>>,
) -> Result<f64, FormError> {
    let value = submit_rate(api, token, rate_input).await?;
    let _ = rate.state().try_set(FetchState::Ready(value));
    history.settle("rate history", api.rate_history(token)).await;
    Ok(value)
}

/// Newest entries first, as returned by the server.
pub fn recent_history(history: &[RateRecord]) -> Vec<RateRecord> {
    history.iter().take(HISTORY_LIMIT).cloned().collect()
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new(use_api());

    let rate: Remote<f64> = Remote::new();
    let history: Remote<Vec<RateRecord>> = Remote::new();
    {
        let api = api.get_value();
        let token = auth.token();
        let fetch_api = api.clone();
        let fetch_token = token.clone();
        rate.load("current rate", async move {
            fetch_api.current_rate(fetch_token.as_deref()).await
        });
        history.load("rate history", async move { api.rate_history(token.as_deref()).await });
    }

    let (rate_input, set_rate_input) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (flash, set_flash) = signal(Option::<Flash>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_flash.set(None);

        let api = api.get_value();
        let token = auth.token();
        let input = rate_input.get_untracked();
        spawn_local(async move {
            match update_rate_and_reload(&api, token.as_deref(), &input, rate, history).await {
                Ok(_) => {
                    let _ = set_flash.try_set(Some(Flash::Success(RATE_UPDATED.to_string())));
                    let _ = set_rate_input.try_set(String::new());
                    set_timeout(
                        move || {
                            let _ = set_flash.try_set(None);
                        },
                        FLASH_TTL,
                    );
                }
                Err(e) => {
                    log::warn!("[Rate] not updated: {}", e);
                    let _ = set_flash.try_set(Some(Flash::Error(e.user_message(UPDATE_FAILED))));
                }
            }
            let _ = set_is_submitting.try_set(false);
        });
    };

    view! {
        <div>
            <h1 class="text-2xl md:text-3xl font-bold">"Settings"</h1>
            <p class="text-base-content/70">"Manage the fertilizer rate used for new orders"</p>
        </div>

        <FetchNotice error=Signal::derive(move || rate.error()) what="the current rate" />

        <div class="grid gap-6 lg:grid-cols-2">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title gap-2">
                        <Settings attr:class="h-5 w-5 text-primary" />
                        "Fertilizer Rate"
                    </h2>
                    <div class="stat px-0">
                        <div class="stat-title">"Current Rate"</div>
                        <div class="stat-value text-primary">
                            {move || if rate.is_loading() {
                                "...".to_string()
                            } else {
                                rate.get_or_default().to_string()
                            }}
                        </div>
                        <div class="stat-desc">"bags per hectare"</div>
                    </div>

                    <form class="space-y-4" on:submit=on_submit>
                        <FlashMessage flash=flash />
                        <div class="form-control">
                            <label class="label" for="rate">
                                <span class="label-text">"New Rate (bags per hectare)"</span>
                            </label>
                            <input
                                id="rate"
                                type="number"
                                step="0.01"
                                min="0"
                                placeholder="e.g. 5"
                                on:input=move |ev| set_rate_input.set(event_target_value(&ev))
                                prop:value=rate_input
                                class="input input-bordered w-full"
                            />
                        </div>
                        <button class="btn btn-primary w-full" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Updating..." }.into_any()
                            } else {
                                "Update Rate".into_any()
                            }}
                        </button>
                    </form>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex items-center gap-2 p-6 pb-2">
                        <Clock attr:class="h-5 w-5 text-primary" />
                        <h2 class="card-title">"Rate History"</h2>
                    </div>
                    <FetchNotice error=Signal::derive(move || history.error()) what="rate history" />
                    <div class="overflow-x-auto w-full">
                        <table class="table w-full">
                            <thead>
                                <tr>
                                    <th>"Rate"</th>
                                    <th>"Updated"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || history.is_loading()>
                                    <tr>
                                        <td colspan="2" class="text-center py-6 text-base-content/50">
                                            <span class="loading loading-spinner loading-sm"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || !history.is_loading() && history.get_or_default().is_empty()>
                                    <tr>
                                        <td colspan="2" class="text-center py-6 text-base-content/50">
                                            "No rate changes yet"
                                        </td>
                                    </tr>
                                </Show>
                                {move || {
                                    recent_history(&history.get_or_default())
                                        .into_iter()
                                        .enumerate()
                                        .map(|(index, record)| {
                                            view! {
                                                <tr>
                                                    <td class="font-medium">
                                                        {format!("{} bags/ha", record.value)}
                                                        {(index == 0).then(|| view! {
                                                            <span class="badge badge-primary badge-sm ml-2">"Latest"</span>
                                                        })}
                                                    </td>
                                                    <td class="text-sm opacity-70">
                                                        {format_date(record.created_at.as_ref(), DateStyle::MonthDayTime)}
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}
