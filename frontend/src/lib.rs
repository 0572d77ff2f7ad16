//! FertiFlow 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与角色守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session` / `auth`: 会话持久化与认证上下文
//! - `api`: REST 客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod error;
mod navigation;
mod resource;
mod session;
#[cfg(test)]
mod testing;

mod components {
    pub mod admin {
        pub mod dashboard;
        pub mod requests;
        pub mod settings;
    }
    pub mod farmer {
        pub mod create_order;
        pub mod dashboard;
        pub mod my_orders;
    }
    mod icons;
    pub mod layout;
    pub mod login;
    mod notice;
    mod order_filter;
    pub mod register;
    mod stat_card;
}

use crate::api::FertiflowApi;
use crate::auth::AuthContext;
use crate::components::admin::dashboard::AdminDashboardPage;
use crate::components::admin::requests::RequestsPage;
use crate::components::admin::settings::SettingsPage;
use crate::components::farmer::create_order::CreateOrderPage;
use crate::components::farmer::dashboard::FarmerDashboardPage;
use crate::components::farmer::my_orders::MyOrdersPage;
use crate::components::layout::DashboardShell;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;
use crate::session::SessionStore;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchTransport;
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。受保护页面包裹在仪表盘外壳中，
/// 每次导航都会重新创建外壳。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::FarmerDashboard => {
            view! { <DashboardShell><FarmerDashboardPage /></DashboardShell> }.into_any()
        }
        AppRoute::FarmerCreateOrder => {
            view! { <DashboardShell><CreateOrderPage /></DashboardShell> }.into_any()
        }
        AppRoute::FarmerOrders => {
            view! { <DashboardShell><MyOrdersPage /></DashboardShell> }.into_any()
        }
        AppRoute::AdminDashboard => {
            view! { <DashboardShell><AdminDashboardPage /></DashboardShell> }.into_any()
        }
        AppRoute::AdminRequests => {
            view! { <DashboardShell><RequestsPage /></DashboardShell> }.into_any()
        }
        AppRoute::AdminSettings => {
            view! { <DashboardShell><SettingsPage /></DashboardShell> }.into_any()
        }
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <Link to=AppRoute::Login class="btn btn-primary">"Back to FertiFlow"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. API 客户端
    let api = FertiflowApi::browser(&AppConfig::from_build_env());
    log::info!("[App] API base {}", api.base_url());
    provide_context(api);

    // 2. 从持久化存储恢复会话
    let auth_ctx = AuthContext::new(SessionStore::browser());
    provide_context(auth_ctx);

    // 3. 获取角色信号，用于注入路由服务（解耦！）
    let role = auth_ctx.role_signal();

    view! {
        // 4. 路由器组件：注入角色信号实现守卫
        <Router role=role>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
