//! Sidebar destinations per role.

use crate::web::route::AppRoute;
use fertiflow_shared::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Dashboard,
    NewOrder,
    Orders,
    Requests,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub route: AppRoute,
    pub icon: NavIcon,
    pub label: &'static str,
}

impl NavItem {
    pub fn path(&self) -> &'static str {
        self.route.to_path()
    }
}

const FARMER_ITEMS: [NavItem; 3] = [
    NavItem {
        route: AppRoute::FarmerDashboard,
        icon: NavIcon::Dashboard,
        label: "Dashboard",
    },
    NavItem {
        route: AppRoute::FarmerCreateOrder,
        icon: NavIcon::NewOrder,
        label: "New Order",
    },
    NavItem {
        route: AppRoute::FarmerOrders,
        icon: NavIcon::Orders,
        label: "My Orders",
    },
];

const ADMIN_ITEMS: [NavItem; 3] = [
    NavItem {
        route: AppRoute::AdminDashboard,
        icon: NavIcon::Dashboard,
        label: "Dashboard",
    },
    NavItem {
        route: AppRoute::AdminRequests,
        icon: NavIcon::Requests,
        label: "Requests",
    },
    NavItem {
        route: AppRoute::AdminSettings,
        icon: NavIcon::Settings,
        label: "Settings",
    },
];

/// Ordered destinations for the signed-in role; nothing when signed out.
pub fn nav_items_for(role: Option<Role>) -> &'static [NavItem] {
    match role {
        Some(Role::Farmer) => &FARMER_ITEMS,
        Some(Role::Admin) => &ADMIN_ITEMS,
        None => &[],
    }
}
