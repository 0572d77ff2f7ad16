use crate::auth::{use_api, use_auth};
use crate::components::icons::*;
use crate::components::notice::FetchNotice;
use crate::components::order_filter::StatusBadge;
use crate::components::stat_card::StatCard;
use crate::resource::Remote;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use fertiflow_shared::Order;
use fertiflow_shared::calc::FarmerStats;
use fertiflow_shared::date::{DateStyle, format_date};
use leptos::prelude::*;

const RECENT_LIMIT: usize = 5;

#[component]
pub fn FarmerDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let orders: Remote<Vec<Order>> = Remote::new();
    let token = auth.token();
    orders.load("my orders", async move { api.my_orders(token.as_deref()).await });

    let stats = Memo::new(move |_| FarmerStats::from_orders(&orders.get_or_default()));
    let greeting = move || auth.state.with(|s| s.greeting_name());
    let recent = move || {
        orders
            .get_or_default()
            .into_iter()
            .take(RECENT_LIMIT)
            .collect::<Vec<_>>()
    };

    view! {
        <div>
            <h1 class="text-2xl md:text-3xl font-bold">{move || format!("Welcome, {}!", greeting())}</h1>
            <p class="text-base-content/70">"Here is an overview of your fertilizer orders."</p>
        </div>

        <FetchNotice error=Signal::derive(move || orders.error()) what="your orders" />

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <StatCard title="Pending" tone="text-warning" value=Signal::derive(move || stats.get().pending.to_string())>
                <Clock attr:class="h-8 w-8" />
            </StatCard>
            <StatCard title="Approved" tone="text-success" value=Signal::derive(move || stats.get().approved.to_string())>
                <CheckCircle attr:class="h-8 w-8" />
            </StatCard>
            <StatCard title="Declined" tone="text-error" value=Signal::derive(move || stats.get().declined.to_string())>
                <XCircle attr:class="h-8 w-8" />
            </StatCard>
            <StatCard
                title="Total Land"
                tone="text-primary"
                value=Signal::derive(move || format!("{:.1} ha", stats.get().total_land))
                description=Signal::derive(move || format!("Avg {:.2} ha per order", stats.get().avg_land_area))
            >
                <Layers attr:class="h-8 w-8" />
            </StatCard>
        </div>

        <div class="grid gap-4 md:grid-cols-2">
            <Link to=AppRoute::FarmerCreateOrder class="card bg-primary text-primary-content shadow-xl hover:shadow-2xl transition-shadow">
                <div class="card-body flex-row items-center justify-between">
                    <div>
                        <h2 class="card-title">"New Order"</h2>
                        <p class="opacity-80">"Request fertilizer for your land"</p>
                    </div>
                    <PlusCircle attr:class="h-10 w-10" />
                </div>
            </Link>
            <Link to=AppRoute::FarmerOrders class="card bg-base-100 shadow-xl hover:shadow-2xl transition-shadow">
                <div class="card-body flex-row items-center justify-between">
                    <div>
                        <h2 class="card-title">"My Orders"</h2>
                        <p class="text-base-content/70">"Track the status of your requests"</p>
                    </div>
                    <ClipboardList attr:class="h-10 w-10 text-primary" />
                </div>
            </Link>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <h3 class="card-title">"Recent Orders"</h3>
                    <Link to=AppRoute::FarmerOrders class="btn btn-ghost btn-sm gap-1">
                        "View all" <ArrowRight attr:class="h-4 w-4" />
                    </Link>
                </div>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Order"</th>
                                <th>"Land Area"</th>
                                <th>"Fertilizer"</th>
                                <th>"Status"</th>
                                <th class="hidden md:table-cell">"Date"</th>
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
                            <Show when=move || !orders.is_loading() && recent().is_empty()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No orders yet. Place your first order to get started."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=recent
                                key=|o| o.id
                                children=move |order| {
                                    view! {
                                        <tr>
                                            <td class="font-mono">{format!("#{}", order.id)}</td>
                                            <td>{format!("{} ha", order.land_area)}</td>
                                            <td>{format!("{} bags", order.fertilizer_qty)}</td>
                                            <td><StatusBadge status=order.status /></td>
                                            <td class="hidden md:table-cell text-sm opacity-70">
                                                {format_date(order.created_at.as_ref(), DateStyle::Full)}
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
