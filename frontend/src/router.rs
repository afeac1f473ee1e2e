use yew::prelude::*;
use yew_router::prelude::*;

use crate::{components::header::Header, pages, session};

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[cfg(not(feature = "mock"))]
    #[at("/")]
    Dashboard,
    #[cfg(feature = "mock")]
    #[at("/trendboard/")]
    Dashboard,

    #[cfg(not(feature = "mock"))]
    #[at("/users")]
    Users,
    #[cfg(feature = "mock")]
    #[at("/trendboard/users")]
    Users,

    #[not_found]
    #[cfg(not(feature = "mock"))]
    #[at("/404")]
    NotFound,
    #[not_found]
    #[cfg(feature = "mock")]
    #[at("/trendboard/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Dashboard => html! { <pages::dashboard::DashboardPage /> },
        Route::Users if session::role().is_admin() => html! { <pages::user_management::UserManagementPage /> },
        Route::Users => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::NotFound => html! { <pages::not_found::NotFoundPage /> },
    }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <div class="flex flex-col bg-[var(--bg)]" style="min-height: 100vh; min-height: 100svh;">
                <Header />
                <main class="mx-auto w-full max-w-7xl flex-1 px-4 py-6">
                    <Switch<Route> render={switch} />
                </main>
            </div>
        </BrowserRouter>
    }
}
