//! Search and status filtering shared by the farmer and admin order tables.

use crate::components::icons::Search;
use fertiflow_shared::{Order, OrderStatus};
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(OrderStatus::Pending),
        StatusFilter::Only(OrderStatus::Approved),
        StatusFilter::Only(OrderStatus::Declined),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "ALL",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        OrderStatus::parse(value)
            .map(StatusFilter::Only)
            .unwrap_or(StatusFilter::All)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Only(status) => status.label(),
        }
    }

    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Which fields the search box looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// A farmer's own orders: id or land area.
    OwnOrders,
    /// Every farmer's orders: farmer name (any case) or id.
    AllFarmers,
}

impl SearchScope {
    pub fn placeholder(&self) -> &'static str {
        match self {
            SearchScope::OwnOrders => "Search by order ID or land area...",
            SearchScope::AllFarmers => "Search by farmer name or order ID...",
        }
    }

    fn matches(&self, order: &Order, needle: &str) -> bool {
        if needle.is_empty() || order.id.to_string().contains(needle) {
            return true;
        }
        match self {
            SearchScope::OwnOrders => order.land_area.to_string().contains(needle),
            SearchScope::AllFarmers => order
                .farmer_name()
                .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase())),
        }
    }
}

/// Orders matching both the search text and the status filter, in list order.
pub fn filter_orders(
    orders: &[Order],
    search: &str,
    status: StatusFilter,
    scope: SearchScope,
) -> Vec<Order> {
    let needle = search.trim();
    orders
        .iter()
        .filter(|o| status.matches(o.status) && scope.matches(o, needle))
        .cloned()
        .collect()
}

/// `1 order`, `3 orders`. `noun` is the singular.
pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Empty-table text: filters in use mean nothing matched, otherwise the list
/// itself is empty.
pub fn empty_message(search: &str, status: StatusFilter, empty_list: &'static str) -> &'static str {
    if search.trim().is_empty() && status == StatusFilter::All {
        empty_list
    } else {
        "No matching orders found"
    }
}

#[component]
pub fn OrderFilterBar(
    scope: SearchScope,
    search: RwSignal<String>,
    status: RwSignal<StatusFilter>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col md:flex-row gap-3 p-4">
            <label class="input input-bordered flex items-center gap-2 flex-1">
                <Search attr:class="h-4 w-4 opacity-50" />
                <input
                    type="text"
                    class="grow"
                    placeholder=scope.placeholder()
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
            </label>
            <select
                class="select select-bordered md:w-48"
                on:change=move |ev| status.set(StatusFilter::parse(&event_target_value(&ev)))
            >
                {StatusFilter::OPTIONS
                    .into_iter()
                    .map(|option| {
                        view! {
                            <option value=option.as_str() selected=move || status.get() == option>
                                {option.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
pub fn StatusBadge(status: OrderStatus) -> impl IntoView {
    let class = match status {
        OrderStatus::Pending => "badge badge-warning badge-sm",
        OrderStatus::Approved => "badge badge-success badge-sm",
        OrderStatus::Declined => "badge badge-error badge-sm",
    };
    view! { <span class=class>{status.label()}</span> }
}
