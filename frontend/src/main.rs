//! Browser dashboard for reviewing and moderating trends.

mod api;
mod components;
mod config;
mod hooks;
#[cfg(feature = "mock")]
mod models;
mod pages;
mod router;
mod session;

use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! {
        <>
            <router::AppRouter />
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
