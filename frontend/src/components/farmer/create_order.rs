use crate::api::FertiflowApi;
use crate::auth::{use_api, use_auth};
use crate::components::icons::*;
use crate::components::notice::{FetchNotice, Flash, FlashMessage};
use crate::error::{FormError, parse_positive};
use crate::resource::Remote;
use fertiflow_shared::Order;
use fertiflow_shared::calc::fertilizer_preview;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

const SUBMIT_FAILED: &str = "Failed to submit order";
const FLASH_TTL: Duration = Duration::from_secs(5);

/// Validates the land area and places the order. Invalid input never reaches
/// the network.
pub async fn submit_order(
    api: &FertiflowApi,
    token: Option<&str>,
    land_area_input: &str,
) -> Result<Order, FormError> {
    let land_area = parse_positive(land_area_input, "land area")?;
    let order = api.create_order(token, land_area).await?;
    log::info!("[Order] submitted #{} for {} ha", order.id, order.land_area);
    Ok(order)
}

/// Uses the quantity the server computed, not the local preview.
pub fn confirmation(order: &Order) -> String {
    format!(
        "Order submitted successfully! Fertilizer Qty: {} bags",
        order.fertilizer_qty
    )
}

/// Preview for whatever is currently typed; unparsable input previews as 0.
pub fn preview_for_input(land_area_input: &str, rate: f64) -> f64 {
    let land_area = land_area_input.trim().parse::<f64>().unwrap_or(0.0);
    fertilizer_preview(land_area, rate)
}

#[component]
pub fn CreateOrderPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let rate: Remote<f64> = Remote::new();
    {
        let api = api.clone();
        let token = auth.token();
        rate.load("current rate", async move { api.current_rate(token.as_deref()).await });
    }

    let (land_area, set_land_area) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (flash, set_flash) = signal(Option::<Flash>::None);

    let preview = move || preview_for_input(&land_area.get(), rate.get_or_default());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_flash.set(None);

        let api = api.clone();
        let token = auth.token();
        let input = land_area.get_untracked();
        spawn_local(async move {
            match submit_order(&api, token.as_deref(), &input).await {
                Ok(order) => {
                    let _ = set_flash.try_set(Some(Flash::Success(confirmation(&order))));
                    let _ = set_land_area.try_set(String::new());
                    set_timeout(
                        move || {
                            let _ = set_flash.try_set(None);
                        },
                        FLASH_TTL,
                    );
                }
                Err(e) => {
                    log::warn!("[Order] not submitted: {}", e);
                    let _ = set_flash.try_set(Some(Flash::Error(e.user_message(SUBMIT_FAILED))));
                }
            }
            let _ = set_is_submitting.try_set(false);
        });
    };

    view! {
        <div>
            <h1 class="text-2xl md:text-3xl font-bold">"New Fertilizer Order"</h1>
            <p class="text-base-content/70">"Enter the size of your land to request fertilizer."</p>
        </div>

        <FetchNotice error=Signal::derive(move || rate.error()) what="the current rate" />

        <div class="grid gap-6 lg:grid-cols-3">
            <div class="card bg-base-100 shadow-xl lg:col-span-2">
                <form class="card-body" on:submit=on_submit>
                    <FlashMessage flash=flash />

                    <div class="form-control">
                        <label class="label" for="land-area">
                            <span class="label-text">"Land Area (hectares)"</span>
                        </label>
                        <input
                            id="land-area"
                            type="number"
                            step="0.01"
                            min="0"
                            placeholder="e.g. 2.5"
                            on:input=move |ev| set_land_area.set(event_target_value(&ev))
                            prop:value=land_area
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control mt-6">
                        <button class="btn btn-primary w-full gap-2" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                            } else {
                                view! { <PlusCircle attr:class="h-5 w-5" /> "Submit Order" }.into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>

            <div class="card bg-primary text-primary-content shadow-xl">
                <div class="card-body">
                    <h2 class="card-title gap-2">
                        <TrendingUp attr:class="h-5 w-5" />
                        "Estimated Fertilizer"
                    </h2>
                    <p class="text-5xl font-bold">{move || format!("{:.2}", preview())}</p>
                    <p class="opacity-80">"bags"</p>
                    <div class="divider my-1"></div>
                    <p class="text-sm opacity-80">
                        {move || if rate.is_loading() {
                            "Loading current rate...".to_string()
                        } else {
                            format!("Current rate: {} bags per hectare", rate.get_or_default())
                        }}
                    </p>
                    <p class="text-xs opacity-70">"The final quantity is calculated when your order is processed."</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::testing::{FARMER_TOKEN, StubBackend};
    use fertiflow_shared::OrderStatus;

    #[tokio::test]
    async fn submitted_order_is_confirmed_with_server_quantity() {
        let backend = StubBackend::with_rate(5.0);
        let api = backend.api();

        let order = submit_order(&api, Some(FARMER_TOKEN), "10").await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        let message = confirmation(&order);
        assert!(message.contains("50"), "{message}");
        assert_eq!(
            message,
            "Order submitted successfully! Fertilizer Qty: 50 bags"
        );

        let mine = api.my_orders(Some(FARMER_TOKEN)).await.unwrap();
        assert!(mine.iter().any(|o| o.id == order.id));
    }

    #[tokio::test]
    async fn invalid_land_area_never_hits_the_network() {
        let backend = StubBackend::with_rate(5.0);
        let api = backend.api();

        for input in ["", "abc", "0", "-2"] {
            let err = submit_order(&api, Some(FARMER_TOKEN), input)
                .await
                .unwrap_err();
            assert_eq!(
                err,
                FormError::Invalid(ValidationError { field: "land area" })
            );
            assert_eq!(err.user_message(SUBMIT_FAILED), "Please enter a valid land area");
        }
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn only_land_area_is_sent() {
        let backend = StubBackend::with_rate(5.0);
        submit_order(&backend.api(), Some(FARMER_TOKEN), " 2.5 ")
            .await
            .unwrap();
        let body = backend.last_request().unwrap().body.unwrap();
        assert_eq!(body, r#"{"landArea":2.5}"#);
    }

    #[tokio::test]
    async fn server_rejection_uses_its_message() {
        let backend = std::sync::Arc::new(StubBackend::default());
        let err = submit_order(&backend.api(), Some(FARMER_TOKEN), "3")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(SUBMIT_FAILED), "No rate configured");
    }

    #[test]
    fn preview_tracks_typed_input() {
        assert_eq!(preview_for_input("10", 5.0), 50.0);
        assert_eq!(preview_for_input(" 2.5", 1.333), 3.33);
        assert_eq!(preview_for_input("", 5.0), 0.0);
        assert_eq!(preview_for_input("abc", 5.0), 0.0);
        assert_eq!(preview_for_input("4", 0.0), 0.0);
    }
}
