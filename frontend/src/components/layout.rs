//! Shell around every signed-in page: navigation rail, identity bar and the
//! page content.

use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::navigation::{NavIcon, NavItem, nav_items_for};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

/// Narrow-viewport rail. Wide viewports always show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarState {
    #[default]
    Closed,
    Open,
}

impl SidebarState {
    pub fn toggle(self) -> Self {
        match self {
            SidebarState::Closed => SidebarState::Open,
            SidebarState::Open => SidebarState::Closed,
        }
    }

    /// Backdrop click or picking a destination.
    pub fn close(self) -> Self {
        SidebarState::Closed
    }

    pub fn is_open(self) -> bool {
        self == SidebarState::Open
    }
}

fn nav_icon(icon: NavIcon) -> AnyView {
    match icon {
        NavIcon::Dashboard => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
        NavIcon::NewOrder => view! { <PlusCircle attr:class="h-5 w-5" /> }.into_any(),
        NavIcon::Orders => view! { <ClipboardList attr:class="h-5 w-5" /> }.into_any(),
        NavIcon::Requests => view! { <Inbox attr:class="h-5 w-5" /> }.into_any(),
        NavIcon::Settings => view! { <Settings attr:class="h-5 w-5" /> }.into_any(),
    }
}

#[component]
pub fn DashboardShell(children: Children) -> impl IntoView {
    // Re-created on every navigation, so the rail starts closed on each page.
    let sidebar = RwSignal::new(SidebarState::default());

    view! {
        <div class="min-h-screen bg-base-200 font-sans lg:pl-64">
            <Sidebar state=sidebar />
            <div class="flex flex-col min-h-screen min-w-0">
                <Navbar on_menu=move || sidebar.update(|s| *s = s.toggle()) />
                <main class="flex-1 p-4 md:p-8">
                    <div class="max-w-7xl mx-auto space-y-6">{children()}</div>
                </main>
            </div>
        </div>
    }
}

#[component]
fn Sidebar(state: RwSignal<SidebarState>) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let role = auth.role_signal();

    let close = move || state.update(|s| *s = s.close());

    let rail_class = move || {
        if state.get().is_open() {
            "fixed inset-y-0 left-0 z-40 w-64 bg-base-100 shadow-xl transition-transform duration-200 translate-x-0"
        } else {
            "fixed inset-y-0 left-0 z-40 w-64 bg-base-100 shadow-xl transition-transform duration-200 -translate-x-full lg:translate-x-0"
        }
    };

    let render_item = move |item: &'static NavItem| {
        let route = item.route;
        let is_active = move || router.current_route().get() == route;
        let on_click = move |ev: leptos::ev::MouseEvent| {
            ev.prevent_default();
            close();
            router.navigate_to_route(route, true);
        };
        view! {
            <li>
                <a
                    href=item.path()
                    on:click=on_click
                    class=move || if is_active() { "active font-semibold" } else { "" }
                >
                    {nav_icon(item.icon)}
                    {item.label}
                </a>
            </li>
        }
    };

    view! {
        <Show when=move || state.get().is_open()>
            <div class="fixed inset-0 z-30 bg-black/40 lg:hidden" on:click=move |_| close()></div>
        </Show>
        <aside class=rail_class>
            <div class="flex items-center justify-between h-16 px-6 border-b border-base-200">
                <div class="flex items-center gap-2 text-primary">
                    <Sprout attr:class="h-7 w-7" />
                    <span class="text-xl font-bold">"FertiFlow"</span>
                </div>
                <button class="btn btn-ghost btn-sm btn-square lg:hidden" on:click=move |_| close()>
                    <X attr:class="h-5 w-5" />
                </button>
            </div>
            <ul class="menu w-full p-4 gap-1">
                {move || nav_items_for(role.get()).iter().map(render_item).collect_view()}
            </ul>
        </aside>
    }
}

#[component]
fn Navbar(on_menu: impl Fn() + 'static) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (menu_open, set_menu_open) = signal(false);

    let initial = move || auth.state.with(|s| s.initial());
    let role_label = move || auth.state.with(|s| s.role_label());
    let name = move || auth.state.with(|s| s.greeting_name());
    let heading = move || auth.state.with(|s| s.account_heading());

    let on_logout = move |_| {
        set_menu_open.set(false);
        logout(&auth);
        router.navigate_to_route(AppRoute::Login, true);
    };

    view! {
        <header class="navbar sticky top-0 z-20 bg-base-100 shadow-sm px-4">
            <div class="flex-none lg:hidden">
                <button class="btn btn-ghost btn-square" on:click=move |_| on_menu()>
                    <Menu attr:class="h-5 w-5" />
                </button>
            </div>
            <div class="flex-1">
                <span class="text-lg font-semibold lg:hidden">"FertiFlow"</span>
            </div>
            <div class="flex-none relative">
                <button class="btn btn-ghost gap-3 normal-case" on:click=move |_| set_menu_open.update(|open| *open = !*open)>
                    <div class="hidden sm:block text-right leading-tight">
                        <p class="text-sm font-semibold">{role_label}</p>
                        <p class="text-xs text-base-content/60">"Welcome back!"</p>
                    </div>
                    <div class="avatar avatar-placeholder">
                        <div class="bg-primary text-primary-content w-10 rounded-full">
                            <span class="font-bold">{initial}</span>
                        </div>
                    </div>
                </button>
                <Show when=move || menu_open.get()>
                    <div class="fixed inset-0 z-40" on:click=move |_| set_menu_open.set(false)></div>
                    <ul class="menu absolute right-0 mt-2 z-50 w-56 p-2 shadow-lg bg-base-100 rounded-box">
                        <li class="menu-title">
                            <div class="flex flex-col gap-0.5 normal-case">
                                <span class="font-bold text-base-content">{move || heading().0}</span>
                                <span class="text-xs font-normal">{move || heading().1}</span>
                                <span class="text-xs font-normal opacity-70">{name}</span>
                            </div>
                        </li>
                        <li>
                            <a class="text-error" on:click=on_logout>
                                <LogOut attr:class="h-4 w-4" />
                                "Logout"
                            </a>
                        </li>
                    </ul>
                </Show>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rail_starts_closed() {
        assert_eq!(SidebarState::default(), SidebarState::Closed);
    }

    #[test]
    fn toggle_flips_and_close_always_closes() {
        let open = SidebarState::Closed.toggle();
        assert!(open.is_open());
        assert_eq!(open.toggle(), SidebarState::Closed);
        assert_eq!(open.close(), SidebarState::Closed);
        assert_eq!(SidebarState::Closed.close(), SidebarState::Closed);
    }
}
