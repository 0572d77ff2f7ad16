use crate::auth::{use_api, use_auth};
use crate::components::notice::FetchNotice;
use crate::components::order_filter::{
    OrderFilterBar, SearchScope, StatusBadge, StatusFilter, count_label, empty_message,
    filter_orders,
};
use crate::resource::Remote;
use fertiflow_shared::Order;
use fertiflow_shared::date::{DateStyle, format_date};
use leptos::prelude::*;

#[component]
pub fn MyOrdersPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let orders: Remote<Vec<Order>> = Remote::new();
    let token = auth.token();
    orders.load("my orders", async move { api.my_orders(token.as_deref()).await });

    let search = RwSignal::new(String::new());
    let status = RwSignal::new(StatusFilter::All);

    let visible = Memo::new(move |_| {
        orders.state().with(|state| {
            let all = state.ready().map(Vec::as_slice).unwrap_or_default();
            filter_orders(all, &search.get(), status.get(), SearchScope::OwnOrders)
        })
    });
    let total = move || orders.state().with(|s| s.ready().map_or(0, Vec::len));

    view! {
        <div class="flex flex-col md:flex-row md:items-end justify-between gap-2">
            <div>
                <h1 class="text-2xl md:text-3xl font-bold">"My Orders"</h1>
                <p class="text-base-content/70">"Track all your fertilizer requests."</p>
            </div>
            <span class="badge badge-neutral badge-lg">
                {move || count_label(visible.with(Vec::len), "order")}
            </span>
        </div>

        <FetchNotice error=Signal::derive(move || orders.error()) what="your orders" />

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <OrderFilterBar scope=SearchScope::OwnOrders search=search status=status />
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Order ID"</th>
                                <th>"Land Area"</th>
                                <th>"Fertilizer Qty"</th>
                                <th>"Status"</th>
                                <th>"Date"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || orders.is_loading()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !orders.is_loading() && visible.with(Vec::is_empty)>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        {move || empty_message(&search.get(), status.get(), "No orders yet")}
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || visible.get()
                                key=|o| o.id
                                children=move |order| {
                                    view! {
                                        <tr>
                                            <td class="font-mono">{format!("#{}", order.id)}</td>
                                            <td>{format!("{} ha", order.land_area)}</td>
                                            <td>{format!("{} bags", order.fertilizer_qty)}</td>
                                            <td><StatusBadge status=order.status /></td>
                                            <td class="text-sm opacity-70">
                                                {format_date(order.created_at.as_ref(), DateStyle::Full)}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
                <div class="px-6 py-4 text-sm text-base-content/60 border-t border-base-200">
                    {move || format!("Showing {} of {} orders", visible.with(Vec::len), total())}
                </div>
            </div>
        </div>
    }
}
