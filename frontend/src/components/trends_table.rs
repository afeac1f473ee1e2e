use trendboard_shared::{
    filters::ViewMode,
    grouping::group_trends,
    model::{Trend, TrendId, TrendStatus},
    selection::{HeaderCheckbox, SelectionSet},
    table::{cell_text, columns_for, impact_class, impact_text, skills_cell, title_cell, Column},
    users::Role,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::loading_spinner::LoadingSpinner;

#[derive(Properties, PartialEq)]
pub struct TrendsTableProps {
    pub trends: Vec<Trend>,
    pub role: Role,
    pub view_mode: ViewMode,
    pub selection: SelectionSet,
    pub header: HeaderCheckbox,
    #[prop_or_default]
    pub loading: bool,
    pub on_toggle_row: Callback<TrendId>,
    pub on_toggle_all: Callback<()>,
    pub on_open: Callback<TrendId>,
}

#[function_component(TrendsTable)]
pub fn trends_table(props: &TrendsTableProps) -> Html {
    if props.loading && props.trends.is_empty() {
        return html! { <LoadingSpinner label="Loading trends..." /> };
    }
    if props.trends.is_empty() {
        return html! {
            <div class="rounded-xl border border-dashed border-[var(--border)] py-16 text-center text-[var(--muted)]">
                {"No trends found"}
            </div>
        };
    }

    let columns = columns_for(props.role);
    let rows = |trends: &[&Trend]| -> Html {
        trends
            .iter()
            .map(|trend| trend_row(trend, columns, props))
            .collect()
    };

    let body = match props.view_mode {
        ViewMode::List => {
            let trends: Vec<&Trend> = props.trends.iter().collect();
            html! {
                <table class="w-full text-left text-sm">
                    <TableHead
                        columns={columns}
                        header={props.header}
                        on_toggle_all={props.on_toggle_all.clone()}
                    />
                    <tbody>{ rows(trends.as_slice()) }</tbody>
                </table>
            }
        },
        ViewMode::Grouped => group_trends(&props.trends)
            .into_iter()
            .map(|group| {
                html! {
                    <section key={group.category.clone()} class="mb-6">
                        <h2 class="mb-2 flex items-center gap-2 text-lg font-semibold">
                            { group.category.clone() }
                            <span class="rounded-full bg-[var(--surface-alt)] px-2 text-xs">{ group.count() }</span>
                        </h2>
                        { for group.subgroups.iter().map(|sub| html! {
                            <div key={sub.name.clone()} class="mb-4 ml-2">
                                <h3 class="mb-1 text-sm font-semibold text-[var(--muted)]">
                                    { format!("{} ({})", sub.name, sub.trends.len()) }
                                </h3>
                                <table class="w-full text-left text-sm">
                                    <TableHead
                                        columns={columns}
                                        header={props.header}
                                        on_toggle_all={props.on_toggle_all.clone()}
                                    />
                                    <tbody>{ rows(sub.trends.as_slice()) }</tbody>
                                </table>
                            </div>
                        }) }
                    </section>
                }
            })
            .collect::<Html>(),
    };

    html! {
        <div class={classes!("overflow-x-auto", props.loading.then_some("opacity-60"))} aria-busy={props.loading.to_string()}>
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TableHeadProps {
    columns: &'static [Column],
    header: HeaderCheckbox,
    on_toggle_all: Callback<()>,
}

#[function_component(TableHead)]
fn table_head(props: &TableHeadProps) -> Html {
    let checkbox = use_node_ref();

    {
        let checkbox = checkbox.clone();
        use_effect_with(props.header, move |header| {
            if let Some(input) = checkbox.cast::<HtmlInputElement>() {
                input.set_indeterminate(*header == HeaderCheckbox::Indeterminate);
            }
        });
    }

    let onchange = {
        let on_toggle_all = props.on_toggle_all.clone();
        Callback::from(move |_: Event| on_toggle_all.emit(()))
    };

    html! {
        <thead class="border-b border-[var(--border)] text-xs uppercase tracking-wide text-[var(--muted)]">
            <tr>
                { for props.columns.iter().map(|column| match column {
                    Column::Select => html! {
                        <th key="select" class="w-10 px-3 py-2">
                            <input
                                ref={checkbox.clone()}
                                type="checkbox"
                                aria-label="Select all on this page"
                                checked={props.header == HeaderCheckbox::Checked}
                                onchange={onchange.clone()}
                            />
                        </th>
                    },
                    other => html! {
                        <th key={other.header()} class="px-3 py-2 font-semibold">{ other.header() }</th>
                    },
                }) }
            </tr>
        </thead>
    }
}

fn trend_row(trend: &Trend, columns: &[Column], props: &TrendsTableProps) -> Html {
    let id = trend.id;
    let selected = props.selection.contains(id);
    let onclick = {
        let on_open = props.on_open.clone();
        Callback::from(move |_| on_open.emit(id))
    };

    let cells = columns
        .iter()
        .map(|column| match column {
            Column::Select => {
                let on_toggle_row = props.on_toggle_row.clone();
                html! {
                    <td key="select" class="px-3 py-2" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                        <input
                            type="checkbox"
                            aria-label={format!("Select {}", trend.title)}
                            checked={selected}
                            onchange={Callback::from(move |_: Event| on_toggle_row.emit(id))}
                        />
                    </td>
                }
            },
            Column::Title => html! {
                <td key="title" class="px-3 py-2 font-medium" title={trend.title.clone()}>{ title_cell(trend) }</td>
            },
            Column::Impact => html! {
                <td key="impact" class="px-3 py-2">
                    <span class={classes!("impact-badge", impact_class(trend.impact()))}>{ impact_text(trend) }</span>
                </td>
            },
            Column::Status => html! {
                <td key="status" class="px-3 py-2">
                    <span class={classes!(
                        "status-badge",
                        if trend.status == Some(TrendStatus::Confirmed) { "status-confirmed" } else { "status-draft" }
                    )}>
                        { cell_text(trend, Column::Status) }
                    </span>
                </td>
            },
            Column::Skills => {
                let skills = skills_cell(trend);
                html! {
                    <td key="skills" class="px-3 py-2">
                        <span class="skill-tag" title={skills.full.clone()}>{ skills.tag.clone() }</span>
                        if skills.more > 0 {
                            <span class="ml-1 text-xs text-[var(--muted)]">{ format!("+{}", skills.more) }</span>
                        }
                    </td>
                }
            },
            other => html! {
                <td key={other.header()} class="px-3 py-2">{ cell_text(trend, *other) }</td>
            },
        })
        .collect::<Html>();

    html! {
        <tr
            key={id}
            class={classes!(
                "cursor-pointer",
                "border-b",
                "border-[var(--border)]",
                "hover:bg-[var(--surface-alt)]",
                selected.then_some("bg-[var(--primary-soft)]")
            )}
            onclick={onclick}
        >
            { cells }
        </tr>
    }
}
