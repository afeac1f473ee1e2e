use trendboard_shared::{
    catalog::OptionCatalog,
    filters::{FilterField, FilterPatch, FilterState, ViewMode},
    model::{TrendStatus, WireEnum},
    users::Role,
};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::multi_select::MultiSelect;

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub filters: FilterState,
    pub catalog: OptionCatalog,
    pub role: Role,
    pub view_mode: ViewMode,
    pub on_apply: Callback<FilterPatch>,
    pub on_remove: Callback<(FilterField, String)>,
    pub on_clear: Callback<()>,
    pub on_view_mode: Callback<ViewMode>,
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let expanded = use_state(|| false);
    let active_count = props.filters.active_count();

    let toggle_panel = {
        let expanded = expanded.clone();
        Callback::from(move |_| expanded.set(!*expanded))
    };
    let clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_| on_clear.emit(()))
    };

    let controls = FilterField::ALL
        .iter()
        .copied()
        .filter(|field| props.role.is_admin() || !field.admin_only())
        .map(|field| {
            if field.is_scalar() {
                status_select(field, &props.filters, &props.on_apply)
            } else {
                let on_change = {
                    let on_apply = props.on_apply.clone();
                    Callback::from(move |values| on_apply.emit(FilterPatch::new().set(field, values)))
                };
                html! {
                    <MultiSelect
                        key={field.param()}
                        label={field.label()}
                        placeholder={format!("All {}", field.label().to_lowercase())}
                        options={props.catalog.options_for(field, &props.filters)}
                        selected={props.filters.selected(field).clone()}
                        on_change={on_change}
                    />
                }
            }
        })
        .collect::<Html>();

    let chips = props
        .filters
        .active()
        .flat_map(|(field, values)| {
            let options = props.catalog.options_for(field, &props.filters);
            values
                .iter()
                .map(|value| {
                    let label = options
                        .iter()
                        .find(|option| &option.key == value)
                        .map_or_else(|| value.clone(), |option| option.label.clone());
                    let onclick = {
                        let on_remove = props.on_remove.clone();
                        let value = value.clone();
                        Callback::from(move |_| on_remove.emit((field, value.clone())))
                    };
                    html! {
                        <span
                            key={format!("{}-{value}", field.param())}
                            class="inline-flex items-center gap-1 rounded-full bg-[var(--primary-soft)] px-3 py-1 text-xs"
                        >
                            <span class="font-semibold">{ format!("{}:", field.label()) }</span>
                            { label }
                            <button
                                type="button"
                                class="ml-1 rounded-full px-1 hover:bg-black/10"
                                aria-label={format!("Remove {} filter", field.label())}
                                onclick={onclick}
                            >
                                {"×"}
                            </button>
                        </span>
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect::<Html>();

    let view_button = |mode: ViewMode, text: &'static str| {
        let on_view_mode = props.on_view_mode.clone();
        let active = props.view_mode == mode;
        html! {
            <button
                type="button"
                class={classes!(
                    "px-3",
                    "py-1.5",
                    "text-sm",
                    "rounded-md",
                    if active { "bg-[var(--primary)] text-white" } else { "text-[var(--text)]" }
                )}
                aria-pressed={active.to_string()}
                onclick={Callback::from(move |_| on_view_mode.emit(mode))}
            >
                { text }
            </button>
        }
    };

    html! {
        <section class="filter-bar space-y-3">
            <div class="flex flex-wrap items-center justify-between gap-3">
                <div class="flex items-center gap-3">
                    <button
                        type="button"
                        class="rounded-lg border border-[var(--border)] px-4 py-2 text-sm font-semibold"
                        aria-expanded={expanded.to_string()}
                        onclick={toggle_panel}
                    >
                        if active_count > 0 {
                            { format!("Filters ({active_count})") }
                        } else {
                            { "Filters" }
                        }
                    </button>
                    if active_count > 0 {
                        <button type="button" class="text-sm text-[var(--primary)] hover:underline" onclick={clear}>
                            {"Clear All"}
                        </button>
                    }
                </div>
                <div class="inline-flex rounded-lg border border-[var(--border)] p-0.5" role="group" aria-label="View mode">
                    { view_button(ViewMode::List, "List") }
                    { view_button(ViewMode::Grouped, "Grouped") }
                </div>
            </div>
            if *expanded {
                <div class="flex flex-wrap gap-4 rounded-xl border border-[var(--border)] bg-[var(--surface)] p-4">
                    { controls }
                </div>
            }
            if active_count > 0 {
                <div class="flex flex-wrap gap-2">{ chips }</div>
            }
        </section>
    }
}

fn status_select(field: FilterField, filters: &FilterState, on_apply: &Callback<FilterPatch>) -> Html {
    let current = filters.selected(field).iter().next().cloned().unwrap_or_default();
    let onchange = {
        let on_apply = on_apply.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            on_apply.emit(FilterPatch::new().set(field, [select.value()]));
        })
    };
    html! {
        <label key={field.param()} class="flex min-w-[10rem] flex-col text-sm">
            <span class="mb-1 text-xs font-semibold uppercase tracking-wide text-[var(--muted)]">
                { field.label() }
            </span>
            <select class="rounded-lg border border-[var(--border)] px-3 py-2" onchange={onchange}>
                <option value="" selected={current.is_empty()}>{"All statuses"}</option>
                { for TrendStatus::ALL.iter().map(|status| html! {
                    <option value={status.as_str()} selected={current == status.as_str()}>
                        { status.label() }
                    </option>
                }) }
            </select>
        </label>
    }
}
