use crate::auth::{use_api, use_auth};
use crate::components::icons::*;
use crate::components::notice::FetchNotice;
use crate::resource::Remote;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use fertiflow_shared::DashboardMetrics;
use fertiflow_shared::calc::percentage;
use leptos::prelude::*;

/// One row of the status breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share {
    pub label: &'static str,
    pub value: u64,
    pub percent: u64,
    pub tone: &'static str,
}

pub fn breakdown(metrics: &DashboardMetrics) -> [Share; 3] {
    let total = metrics.total();
    let share = |label: &'static str, value: u64, tone: &'static str| Share {
        label,
        value,
        percent: percentage(value, total),
        tone,
    };
    [
        share("Approved", metrics.approved, "progress-success"),
        share("Declined", metrics.declined, "progress-error"),
        share("Pending", metrics.pending, "progress-warning"),
    ]
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let metrics: Remote<DashboardMetrics> = Remote::new();
    let token = auth.token();
    metrics.load("dashboard metrics", async move {
        api.dashboard_metrics(token.as_deref()).await
    });

    // "..." until the first response, like a skeleton.
    let figure = move |pick: fn(&DashboardMetrics) -> u64| {
        move || {
            if metrics.is_loading() {
                "...".to_string()
            } else {
                pick(&metrics.get_or_default()).to_string()
            }
        }
    };
    let approval_rate = move || {
        let m = metrics.get_or_default();
        format!("{}%", percentage(m.approved, m.total()))
    };

    view! {
        <div>
            <h1 class="text-2xl md:text-3xl font-bold">"Admin Dashboard"</h1>
            <p class="text-base-content/70">"Overview of all farmer requests and system metrics"</p>
        </div>

        <FetchNotice error=Signal::derive(move || metrics.error()) what="dashboard metrics" />

        <div class="grid gap-4 md:grid-cols-3">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <CheckCircle attr:class="h-8 w-8 text-success" />
                    <p class="text-3xl font-bold">{figure(|m| m.approved)}</p>
                    <p class="text-base-content/70">"Approved Requests"</p>
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <XCircle attr:class="h-8 w-8 text-error" />
                    <p class="text-3xl font-bold">{figure(|m| m.declined)}</p>
                    <p class="text-base-content/70">"Declined Requests"</p>
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <Clock attr:class="h-8 w-8 text-warning" />
                    <p class="text-3xl font-bold">{figure(|m| m.pending)}</p>
                    <p class="text-base-content/70">"Pending Requests"</p>
                </div>
            </div>
        </div>

        <div class="grid gap-6 lg:grid-cols-3">
            <div class="card bg-base-100 shadow-xl lg:col-span-2">
                <div class="card-body">
                    <h2 class="card-title">"Request Distribution"</h2>
                    {move || {
                        breakdown(&metrics.get_or_default())
                            .into_iter()
                            .map(|share| {
                                view! {
                                    <div class="space-y-1">
                                        <div class="flex justify-between text-sm">
                                            <span>{share.label}</span>
                                            <span class="font-medium">
                                                {format!("{} ({}%)", share.value, share.percent)}
                                            </span>
                                        </div>
                                        <progress
                                            class=format!("progress w-full {}", share.tone)
                                            value=share.percent.to_string()
                                            max="100"
                                        ></progress>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                    <p class="text-sm text-base-content/60 mt-2">
                        {move || format!("Total requests: {}", metrics.get_or_default().total())}
                    </p>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"Quick Actions"</h2>
                    <Link to=AppRoute::AdminRequests class="btn btn-primary w-full">
                        "Manage Requests"
                    </Link>
                    <div class="divider my-1"></div>
                    <h3 class="font-semibold">"System Status"</h3>
                    <div class="flex justify-between text-sm">
                        <span class="text-base-content/70">"Active Requests"</span>
                        <span class="font-medium">{move || metrics.get_or_default().pending}</span>
                    </div>
                    <div class="flex justify-between text-sm">
                        <span class="text-base-content/70">"Approval Rate"</span>
                        <span class="font-medium text-success">{approval_rate}</span>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_are_rounded_percentages() {
        let metrics = DashboardMetrics {
            approved: 1,
            declined: 1,
            pending: 1,
        };
        let percents: Vec<u64> = breakdown(&metrics).iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![33, 33, 33]);

        let metrics = DashboardMetrics {
            approved: 3,
            declined: 0,
            pending: 1,
        };
        let percents: Vec<u64> = breakdown(&metrics).iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![75, 0, 25]);
    }

    #[test]
    fn empty_metrics_are_all_zero() {
        for share in breakdown(&DashboardMetrics::default()) {
            assert_eq!(share.percent, 0);
            assert_eq!(share.value, 0);
        }
    }
}
