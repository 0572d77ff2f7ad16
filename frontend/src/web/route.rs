//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由以及基于角色的访问守卫。

use fertiflow_shared::Role;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    Register,
    FarmerDashboard,
    FarmerOrders,
    FarmerCreateOrder,
    AdminDashboard,
    AdminRequests,
    AdminSettings,
    /// 页面未找到
    NotFound,
}

/// 守卫结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Allow,
    Redirect(AppRoute),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" | "/login" => Self::Login,
            "/register" => Self::Register,
            "/farmer/dashboard" => Self::FarmerDashboard,
            "/farmer/orders" => Self::FarmerOrders,
            "/farmer/create-order" => Self::FarmerCreateOrder,
            "/admin/dashboard" => Self::AdminDashboard,
            "/admin/requests" => Self::AdminRequests,
            "/admin/settings" => Self::AdminSettings,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Register => "/register",
            Self::FarmerDashboard => "/farmer/dashboard",
            Self::FarmerOrders => "/farmer/orders",
            Self::FarmerCreateOrder => "/farmer/create-order",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminRequests => "/admin/requests",
            Self::AdminSettings => "/admin/settings",
            Self::NotFound => "/404",
        }
    }

    /// The role a visitor must hold. `None` for public pages.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::FarmerDashboard | Self::FarmerOrders | Self::FarmerCreateOrder => {
                Some(Role::Farmer)
            }
            Self::AdminDashboard | Self::AdminRequests | Self::AdminSettings => Some(Role::Admin),
            Self::Login | Self::Register | Self::NotFound => None,
        }
    }

    /// 已认证用户应该离开的页面（登录、注册）
    pub fn is_entry_page(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Landing page for a signed-in role.
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Farmer => Self::FarmerDashboard,
        }
    }

    /// **核心守卫逻辑**
    ///
    /// `role` is the session's role, `None` meaning not signed in.
    pub fn authorize(&self, role: Option<Role>) -> RouteAccess {
        match (self.required_role(), role) {
            (None, Some(role)) if self.is_entry_page() => RouteAccess::Redirect(Self::home_for(role)),
            (None, _) => RouteAccess::Allow,
            (Some(_), None) => RouteAccess::Redirect(Self::Login),
            (Some(required), Some(role)) if required == role => RouteAccess::Allow,
            (Some(_), Some(role)) => RouteAccess::Redirect(Self::home_for(role)),
        }
    }

    /// The route actually rendered for this request. Redirect targets are
    /// always allowed for the same role, so one hop is enough.
    pub fn resolve(self, role: Option<Role>) -> Self {
        match self.authorize(role) {
            RouteAccess::Allow => self,
            RouteAccess::Redirect(target) => target,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
