use yew::prelude::*;
use yew_router::prelude::*;

use crate::{router::Route, session};

#[function_component(Header)]
pub fn header() -> Html {
    let route = use_route::<Route>();
    let is_admin = session::role().is_admin();

    let crumb = match route {
        Some(Route::Users) => "User Management",
        Some(Route::NotFound) => "Not Found",
        _ => "Trends",
    };

    let on_logout = Callback::from(|_| {
        session::logout();
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    });

    let nav_link = |target: Route, text: &'static str| {
        let active = route.as_ref() == Some(&target);
        html! {
            <Link<Route>
                to={target}
                classes={classes!(
                    "px-3",
                    "py-2",
                    "rounded-lg",
                    "text-sm",
                    "font-medium",
                    if active { "bg-[var(--primary-soft)] text-[var(--primary)]" } else { "text-[var(--text)]" }
                )}
            >
                { text }
            </Link<Route>>
        }
    };

    html! {
        <header class="sticky top-0 z-30 border-b border-[var(--border)] bg-[var(--surface)]">
            <div class="mx-auto flex max-w-7xl items-center justify-between gap-4 px-4 py-3">
                <div class="flex items-center gap-6">
                    <Link<Route> to={Route::Dashboard} classes="text-lg font-bold">{"Trendboard"}</Link<Route>>
                    <nav class="flex items-center gap-1" aria-label="Main">
                        { nav_link(Route::Dashboard, "Dashboard") }
                        if is_admin {
                            { nav_link(Route::Users, "Users") }
                        }
                    </nav>
                </div>
                <div class="flex items-center gap-3 text-sm">
                    <span class="rounded-full bg-[var(--surface-alt)] px-3 py-1">{ session::role_label() }</span>
                    <button type="button" class="text-[var(--muted)] hover:text-[var(--text)]" onclick={on_logout}>
                        {"Log out"}
                    </button>
                </div>
            </div>
            <nav class="mx-auto max-w-7xl px-4 pb-2 text-xs text-[var(--muted)]" aria-label="Breadcrumb">
                <Link<Route> to={Route::Dashboard}>{"Home"}</Link<Route>>
                <span class="mx-1">{"/"}</span>
                <span aria-current="page">{ crumb }</span>
            </nav>
        </header>
    }
}
