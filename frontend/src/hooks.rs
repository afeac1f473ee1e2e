use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use trendboard_shared::{
    dashboard::{DashboardState, Effect},
    moderation::Moderation,
    notify::Notice,
    users::Role,
};
use yew::prelude::*;

use crate::api;

/// Shared handle to the dashboard controller.
///
/// The controller lives in a `RefCell` so async completions always fold into
/// the latest state; every mutation forces a re-render and then runs the
/// effects the controller asked for.
#[derive(Clone)]
pub struct DashboardHandle {
    state: Rc<RefCell<DashboardState>>,
    redraw: UseForceUpdateHandle,
    notice: UseStateHandle<Option<Notice>>,
}

impl PartialEq for DashboardHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) && self.notice == other.notice
    }
}

impl DashboardHandle {
    pub fn state(&self) -> Ref<'_, DashboardState> {
        self.state.borrow()
    }

    pub fn notice(&self) -> Option<Notice> {
        (*self.notice).clone()
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    pub fn dispatch(&self, f: impl FnOnce(&mut DashboardState) -> Vec<Effect>) {
        let effects = f(&mut self.state.borrow_mut());
        self.redraw.force_update();
        self.run(effects);
    }

    pub fn update(&self, f: impl FnOnce(&mut DashboardState)) {
        f(&mut self.state.borrow_mut());
        self.redraw.force_update();
    }

    /// Sends `moderation` after the confirmation prompt, when it has one.
    pub fn moderate(&self, moderation: Moderation) {
        if let Some(prompt) = moderation.confirmation_prompt() {
            if !confirm(&prompt) {
                return;
            }
        }
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = api::moderate(moderation.action, &moderation.target).await;
            if let Err(err) = &outcome {
                web_sys::console::error_1(&format!("Moderation failed: {err}").into());
            }
            this.dispatch(|state| state.moderation_finished(&moderation, outcome));
        });
    }

    fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notify(notice) => self.notice.set(Some(notice)),
                Effect::LoadCatalog => {
                    let this = self.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match api::fetch_catalog().await {
                            Ok(catalog) => this.dispatch(|state| state.catalog_loaded(catalog)),
                            Err(err) => {
                                web_sys::console::error_1(&format!("Failed to fetch catalog: {err}").into());
                                this.dispatch(|state| state.catalog_failed(&err));
                            },
                        }
                    });
                },
                Effect::FetchTrends {
                    ticket,
                    params,
                } => {
                    let this = self.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match api::fetch_trends(&params).await {
                            Ok(listing) => this.dispatch(|state| state.trends_loaded(ticket, listing)),
                            Err(err) => {
                                web_sys::console::error_1(&format!("Failed to fetch trends: {err}").into());
                                this.dispatch(|state| state.trends_failed(ticket, &err));
                            },
                        }
                    });
                },
                Effect::FetchStats {
                    ticket,
                    params,
                } => {
                    let this = self.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match api::fetch_stats(&params).await {
                            Ok(stats) => this.update(|state| {
                                let _ = state.stats_loaded(ticket, stats);
                            }),
                            Err(err) => this.dispatch(|state| state.stats_failed(ticket, &err)),
                        }
                    });
                },
                Effect::FetchRelated {
                    ticket,
                    trend_id,
                    params,
                } => {
                    let this = self.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match api::fetch_trends(&params).await {
                            Ok(listing) => this.update(|state| {
                                let _ = state.related_loaded(ticket, trend_id, listing.trends);
                            }),
                            Err(err) => this.update(|state| state.related_failed(ticket, trend_id, &err)),
                        }
                    });
                },
            }
        }
    }
}

/// `window.confirm`, treating an unavailable window as a refusal.
pub fn confirm(prompt: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(prompt).ok())
        .unwrap_or(false)
}

/// Mounts the dashboard controller for `role` and loads the catalog once.
#[hook]
pub fn use_dashboard(role: Role) -> DashboardHandle {
    let state = use_mut_ref(move || DashboardState::new(role));
    let redraw = use_force_update();
    let notice = use_state(|| None::<Notice>);
    let handle = DashboardHandle {
        state,
        redraw,
        notice,
    };

    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            handle.dispatch(DashboardState::mount);
            || ()
        });
    }

    handle
}

/// Hides the page scrollbar while `locked` is set.
#[hook]
pub fn use_scroll_lock(locked: bool) {
    use_effect_with(locked, move |locked| {
        let body = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body());
        if *locked {
            if let Some(body) = &body {
                let _ = body.style().set_property("overflow", "hidden");
            }
        }
        move || {
            if let Some(body) = body {
                let _ = body.style().remove_property("overflow");
            }
        }
    });
}
