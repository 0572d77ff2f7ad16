use crate::api::FertiflowApi;
use crate::auth::{use_api, use_auth};
use crate::components::icons::*;
use crate::components::notice::{FetchNotice, Flash, FlashMessage};
use crate::components::order_filter::{
    OrderFilterBar, SearchScope, StatusBadge, StatusFilter, count_label, empty_message,
    filter_orders,
};
use crate::error::ApiResult;
use crate::resource::Remote;
use fertiflow_shared::Order;
use fertiflow_shared::date::{DateStyle, format_date};
use fertiflow_shared::protocol::ReviewDecision;
use leptos::prelude::*;
use leptos::task::spawn_local;

const REVIEW_FAILED: &str = "Failed to update order status";

/// Applies a review decision, then reloads `orders` so the row shows its new
/// status. A rejected decision leaves `orders` as it was.
pub async fn review_and_reload(
    api: &FertiflowApi,
    token: Option<&str>,
    id: u64,
    decision: ReviewDecision,
    orders: Remote<Vec<Order>>,
) -> ApiResult<()> {
    api.review_order(token, id, decision).await?;
    log::info!("[Review] order #{} {}", id, decision.as_path());
    orders.settle("all orders", api.all_orders(token)).await;
    Ok(())
}

#[component]
pub fn RequestsPage() -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new(use_api());

    let orders: Remote<Vec<Order>> = Remote::new();
    {
        let api = api.get_value();
        let token = auth.token();
        orders.load("all orders", async move { api.all_orders(token.as_deref()).await });
    }

    let search = RwSignal::new(String::new());
    let status = RwSignal::new(StatusFilter::All);
    let (flash, set_flash) = signal(Option::<Flash>::None);
    // Order currently being reviewed; its buttons are disabled.
    let reviewing = RwSignal::new(Option::<u64>::None);

    let visible = Memo::new(move |_| {
        orders.state().with(|state| {
            let all = state.ready().map(Vec::as_slice).unwrap_or_default();
            filter_orders(all, &search.get(), status.get(), SearchScope::AllFarmers)
        })
    });

    let review = move |id: u64, decision: ReviewDecision| {
        reviewing.set(Some(id));
        set_flash.set(None);
        let api = api.get_value();
        let token = auth.token();
        // Only owned values and `try_set` past this point: the page may close
        // while the call is in flight.
        spawn_local(async move {
            if let Err(e) = review_and_reload(&api, token.as_deref(), id, decision, orders).await {
                log::warn!("[Review] order #{} not updated: {}", id, e);
                let _ = set_flash.try_set(Some(Flash::Error(e.user_message(REVIEW_FAILED))));
            }
            let _ = reviewing.try_set(None);
        });
    };

    view! {
        <div class="flex flex-col md:flex-row md:items-end justify-between gap-2">
            <div>
                <h1 class="text-2xl md:text-3xl font-bold">"Fertilizer Requests"</h1>
                <p class="text-base-content/70">"Review and manage farmer fertilizer requests"</p>
            </div>
            <span class="badge badge-neutral badge-lg">
                {move || count_label(visible.with(Vec::len), "request")}
            </span>
        </div>

        <FetchNotice error=Signal::derive(move || orders.error()) what="requests" />
        <FlashMessage flash=flash />

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <OrderFilterBar scope=SearchScope::AllFarmers search=search status=status />
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Order"</th>
                                <th>"Farmer"</th>
                                <th>"Land Area"</th>
                                <th>"Fertilizer"</th>
                                <th>"Status"</th>
                                <th class="hidden md:table-cell">"Date"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || orders.is_loading()>
                                <tr>
                                    <td colspan="7" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !orders.is_loading() && visible.with(Vec::is_empty)>
                                <tr>
                                    <td colspan="7" class="text-center py-8 text-base-content/50">
                                        {move || empty_message(&search.get(), status.get(), "No requests yet")}
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || visible.get()
                                key=|o| (o.id, o.status)
                                children=move |order| {
                                    let id = order.id;
                                    let busy = move || reviewing.get() == Some(id);
                                    view! {
                                        <tr>
                                            <td class="font-mono">{format!("#{}", id)}</td>
                                            <td class="font-medium">
                                                {order.farmer_name().unwrap_or("Unknown").to_string()}
                                            </td>
                                            <td>{format!("{} ha", order.land_area)}</td>
                                            <td>{format!("{} bags", order.fertilizer_qty)}</td>
                                            <td><StatusBadge status=order.status /></td>
                                            <td class="hidden md:table-cell text-sm opacity-70">
                                                {format_date(order.created_at.as_ref(), DateStyle::MonthDay)}
                                            </td>
                                            <td>
                                                {if order.is_pending() {
                                                    view! {
                                                        <div class="flex gap-2">
                                                            <button
                                                                class="btn btn-success btn-xs gap-1"
                                                                disabled=busy
                                                                on:click=move |_| review(id, ReviewDecision::Approve)
                                                            >
                                                                <CheckCircle attr:class="h-3 w-3" />
                                                                "Approve"
                                                            </button>
                                                            <button
                                                                class="btn btn-error btn-outline btn-xs gap-1"
                                                                disabled=busy
                                                                on:click=move |_| review(id, ReviewDecision::Decline)
                                                            >
                                                                <XCircle attr:class="h-3 w-3" />
                                                                "Decline"
                                                            </button>
                                                        </div>
                                                    }
                                                    .into_any()
                                                } else {
                                                    view! { <span class="text-sm opacity-50">"Processed"</span> }.into_any()
                                                }}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ADMIN_TOKEN, StubBackend};
    use fertiflow_shared::OrderStatus;
    use fertiflow_shared::protocol::HttpMethod;

    async fn loaded(api: &FertiflowApi) -> Remote<Vec<Order>> {
        let orders = Remote::new();
        orders.settle("all orders", api.all_orders(Some(ADMIN_TOKEN))).await;
        orders
    }

    #[tokio::test]
    async fn approval_reloads_list() {
        let backend = StubBackend::with_rate(5.0);
        backend.seed_order(1, "Amina", 2.0, OrderStatus::Pending);
        let api = backend.api();
        let orders = loaded(&api).await;

        review_and_reload(&api, Some(ADMIN_TOKEN), 1, ReviewDecision::Approve, orders)
            .await
            .unwrap();

        assert_eq!(orders.get_or_default()[0].status, OrderStatus::Approved);
        let last = backend.last_request().unwrap();
        assert_eq!(last.method, HttpMethod::Get);
        assert!(last.url.ends_with("/admin/orders"));
    }

    #[tokio::test]
    async fn conflict_keeps_list_and_reports_server_message() {
        let backend = StubBackend::with_rate(5.0);
        backend.seed_order(1, "Amina", 2.0, OrderStatus::Approved);
        let api = backend.api();
        let orders = loaded(&api).await;
        let before = orders.state().get_untracked();

        let err = review_and_reload(&api, Some(ADMIN_TOKEN), 1, ReviewDecision::Decline, orders)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(REVIEW_FAILED), "Order already reviewed");
        assert_eq!(orders.state().get_untracked(), before);
        assert_eq!(backend.last_request().unwrap().method, HttpMethod::Patch);
    }

    #[tokio::test]
    async fn review_finishing_after_page_closed_is_ignored() {
        let backend = StubBackend::with_rate(5.0);
        backend.seed_order(1, "Amina", 2.0, OrderStatus::Pending);

        let owner = Owner::new();
        let (api, orders) = owner.with(|| {
            let api = StoredValue::new(backend.api());
            (api.get_value(), Remote::<Vec<Order>>::new())
        });
        owner.cleanup();

        review_and_reload(&api, Some(ADMIN_TOKEN), 1, ReviewDecision::Approve, orders)
            .await
            .unwrap();

        assert_eq!(backend.order_status(1), Some(OrderStatus::Approved));
    }
}
