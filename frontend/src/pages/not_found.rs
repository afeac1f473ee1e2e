use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="py-20 text-center">
            <h2 class="text-2xl font-bold">{"404 - Page not found"}</h2>
            <p class="mt-2 text-[var(--muted)]">{"The page you are looking for does not exist."}</p>
            <Link<Route> to={Route::Dashboard} classes="mt-6 inline-block text-[var(--primary)] hover:underline">
                {"Back to trends"}
            </Link<Route>>
        </div>
    }
}
