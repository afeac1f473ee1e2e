use trendboard_shared::{
    dashboard::DashboardState,
    detail::DetailTab,
    filters::{FilterField, FilterPatch, ViewMode},
    model::TrendId,
    moderation::ModerationAction,
    query::PageSize,
};
use yew::prelude::*;

use crate::{
    components::{
        detail_panel::DetailPanel, filter_bar::FilterBar, pagination::PaginationBar, stats_cards::StatsCards,
        toast::Toast, trends_table::TrendsTable,
    },
    hooks::use_dashboard,
    session,
};

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let handle = use_dashboard(session::role());

    let on_apply = {
        let handle = handle.clone();
        Callback::from(move |patch: FilterPatch| handle.dispatch(|state| state.apply_filters(patch)))
    };
    let on_remove = {
        let handle = handle.clone();
        Callback::from(move |(field, value): (FilterField, String)| {
            handle.dispatch(|state| state.remove_filter_value(field, &value))
        })
    };
    let on_clear = {
        let handle = handle.clone();
        Callback::from(move |_| handle.dispatch(DashboardState::clear_filters))
    };
    let on_view_mode = {
        let handle = handle.clone();
        Callback::from(move |mode: ViewMode| handle.update(|state| state.set_view_mode(mode)))
    };
    let on_toggle_row = {
        let handle = handle.clone();
        Callback::from(move |id: TrendId| handle.update(|state| state.toggle_row(id)))
    };
    let on_toggle_all = {
        let handle = handle.clone();
        Callback::from(move |_| handle.update(DashboardState::toggle_visible))
    };
    let on_open = {
        let handle = handle.clone();
        Callback::from(move |id: TrendId| handle.dispatch(|state| state.open_detail(id)))
    };
    let on_page_change = {
        let handle = handle.clone();
        Callback::from(move |page: u32| handle.dispatch(|state| state.go_to_page(page)))
    };
    let on_page_size_change = {
        let handle = handle.clone();
        Callback::from(move |size: PageSize| handle.dispatch(|state| state.set_page_size(size)))
    };
    let on_close_detail = {
        let handle = handle.clone();
        Callback::from(move |_| handle.update(DashboardState::close_detail))
    };
    let on_tab = {
        let handle = handle.clone();
        Callback::from(move |tab: DetailTab| handle.update(|state| state.select_tab(tab)))
    };
    let on_related = {
        let handle = handle.clone();
        Callback::from(move |id: TrendId| handle.dispatch(|state| state.select_related(id)))
    };
    let on_moderate_detail = {
        let handle = handle.clone();
        Callback::from(move |action: ModerationAction| {
            let moderation = handle.state().detail_moderation(action);
            if let Some(moderation) = moderation {
                handle.moderate(moderation);
            }
        })
    };
    let bulk = |action: ModerationAction| {
        let handle = handle.clone();
        Callback::from(move |_: MouseEvent| {
            let moderation = handle.state().bulk_moderation(action);
            if let Some(moderation) = moderation {
                handle.moderate(moderation);
            }
        })
    };
    let on_dismiss = {
        let handle = handle.clone();
        Callback::from(move |_| handle.dismiss_notice())
    };

    let state = handle.state();
    let role = state.role();
    let selected = state.selection().len();

    html! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold">{"Trends"}</h1>
                    <p class="text-sm text-[var(--muted)]">{"Explore, filter and review workplace trends."}</p>
                </div>
            </div>
            <StatsCards stats={state.stats().cloned()} loading={state.loading_stats()} />
            <FilterBar
                filters={state.filters().clone()}
                catalog={state.catalog().clone()}
                role={role}
                view_mode={state.view_mode()}
                on_apply={on_apply}
                on_remove={on_remove}
                on_clear={on_clear}
                on_view_mode={on_view_mode}
            />
            if role.is_admin() && selected > 0 {
                <div class="flex flex-wrap items-center justify-between gap-3 rounded-xl border border-[var(--primary)] bg-[var(--primary-soft)] px-4 py-3">
                    <span class="text-sm font-semibold">{ format!("{selected} selected") }</span>
                    <div class="flex gap-2">
                        <button
                            type="button"
                            class="rounded-lg border border-red-500 px-3 py-1.5 text-sm font-semibold text-red-600"
                            onclick={bulk(ModerationAction::Disapprove)}
                        >
                            {"Disapprove Selected"}
                        </button>
                        <button
                            type="button"
                            class="rounded-lg bg-[var(--primary)] px-3 py-1.5 text-sm font-semibold text-white"
                            onclick={bulk(ModerationAction::Approve)}
                        >
                            {"Approve Selected"}
                        </button>
                    </div>
                </div>
            }
            <TrendsTable
                trends={state.trends().to_vec()}
                role={role}
                view_mode={state.view_mode()}
                selection={state.selection().clone()}
                header={state.header_checkbox()}
                loading={state.loading_trends()}
                on_toggle_row={on_toggle_row}
                on_toggle_all={on_toggle_all}
                on_open={on_open}
            />
            <PaginationBar
                pagination={*state.pagination()}
                on_page_change={on_page_change}
                on_page_size_change={on_page_size_change}
            />
            if let (Some(trend), Some(tab)) = (state.detail().trend(), state.detail().tab()) {
                <DetailPanel
                    trend={trend.clone()}
                    tab={tab}
                    related={state.detail().related().map(<[_]>::to_vec)}
                    role={role}
                    on_close={on_close_detail}
                    on_tab={on_tab}
                    on_related={on_related}
                    on_moderate={on_moderate_detail}
                />
            }
            <Toast notice={handle.notice()} on_close={on_dismiss} />
        </div>
    }
}
