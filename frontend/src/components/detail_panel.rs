use trendboard_shared::{
    attribution::attribute,
    detail::{description_sections, stat_rows, DetailTab, StatRow},
    model::{Source, Trend, TrendId, WireEnum},
    moderation::ModerationAction,
    table::{capitalize, impact_class, impact_text, EMPTY_CELL},
    users::Role,
};
use yew::prelude::*;

use crate::{
    components::loading_spinner::{LoadingSpinner, SpinnerSize},
    hooks::use_scroll_lock,
};

#[derive(Properties, PartialEq)]
pub struct DetailPanelProps {
    pub trend: Trend,
    pub tab: DetailTab,
    pub related: Option<Vec<Trend>>,
    pub role: Role,
    pub on_close: Callback<()>,
    pub on_tab: Callback<DetailTab>,
    pub on_related: Callback<TrendId>,
    pub on_moderate: Callback<ModerationAction>,
}

/// Slide-over with everything known about one trend.
#[function_component(DetailPanel)]
pub fn detail_panel(props: &DetailPanelProps) -> Html {
    use_scroll_lock(true);

    let trend = &props.trend;
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());
    let can_moderate = props.role.is_admin() && trend.is_draft();

    let moderate = |action: ModerationAction| {
        let on_moderate = props.on_moderate.clone();
        Callback::from(move |_| on_moderate.emit(action))
    };

    let tabs = DetailTab::available(props.role);
    let body = match props.tab {
        DetailTab::Details => details_tab(trend, props),
        DetailTab::AllDescriptions => descriptions_tab(trend, props.role),
    };

    html! {
        <div class="fixed inset-0 z-40 flex justify-end bg-black/40" onclick={close.clone()}>
            <aside
                class="flex h-full w-full max-w-2xl flex-col bg-[var(--surface)] shadow-2xl"
                role="dialog"
                aria-modal="true"
                aria-label={trend.title.clone()}
                onclick={keep_open}
            >
                <header class="flex items-start justify-between gap-4 border-b border-[var(--border)] p-5">
                    <div>
                        <h2 class="text-xl font-bold">{ trend.title.clone() }</h2>
                        <p class="mt-1 text-sm text-[var(--muted)]">
                            { meta_line(trend) }
                        </p>
                    </div>
                    <button type="button" class="text-2xl leading-none" aria-label="Close" onclick={close}>
                        {"×"}
                    </button>
                </header>
                if tabs.len() > 1 {
                    <nav class="flex gap-2 border-b border-[var(--border)] px-5" role="tablist">
                        { for tabs.iter().map(|tab| {
                            let tab = *tab;
                            let active = props.tab == tab;
                            let on_tab = props.on_tab.clone();
                            html! {
                                <button
                                    key={tab.label()}
                                    type="button"
                                    role="tab"
                                    aria-selected={active.to_string()}
                                    class={classes!(
                                        "px-3",
                                        "py-2",
                                        "text-sm",
                                        "border-b-2",
                                        if active { "border-[var(--primary)] font-semibold" } else { "border-transparent" }
                                    )}
                                    onclick={Callback::from(move |_| on_tab.emit(tab))}
                                >
                                    { tab.label() }
                                </button>
                            }
                        }) }
                    </nav>
                }
                <div class="flex-1 space-y-6 overflow-y-auto p-5">{ body }</div>
                if can_moderate {
                    <footer class="flex justify-end gap-3 border-t border-[var(--border)] p-4">
                        <button
                            type="button"
                            class="rounded-lg border border-red-500 px-4 py-2 text-sm font-semibold text-red-600"
                            onclick={moderate(ModerationAction::Disapprove)}
                        >
                            {"Disapprove"}
                        </button>
                        <button
                            type="button"
                            class="rounded-lg bg-[var(--primary)] px-4 py-2 text-sm font-semibold text-white"
                            onclick={moderate(ModerationAction::Approve)}
                        >
                            {"Approve"}
                        </button>
                    </footer>
                }
            </aside>
        </div>
    }
}

fn meta_line(trend: &Trend) -> String {
    [
        trend.category_name().map(str::to_string),
        trend.department_name.clone(),
        trend.time_horizon.map(|horizon| horizon.label().to_string()),
        trend.scope.map(|scope| capitalize(scope.as_str())),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ")
}

fn details_tab(trend: &Trend, props: &DetailPanelProps) -> Html {
    let description = description_sections(trend, props.role)
        .into_iter()
        .next()
        .map(|section| section.text);

    html! {
        <>
            <div class="flex flex-wrap items-center gap-2">
                <span class={classes!("impact-badge", impact_class(trend.impact()))}>{ impact_text(trend) }</span>
                { for trend.sub_category.iter().map(|sub| html! {
                    <span key={sub.clone()} class="rounded-full bg-[var(--surface-alt)] px-2 py-0.5 text-xs">{ sub.clone() }</span>
                }) }
            </div>
            if let Some(text) = description {
                { text_block("Description", Some(attributed(text, &trend.sources))) }
            }
            { text_block("Workplace Example", trend.workplace_example.as_deref().map(Html::from)) }
            { text_block("Work Consequences", trend.work_consequences.as_deref().map(Html::from)) }
            { list_block("Affected Skills", &trend.skills) }
            { list_block("Opportunities", &trend.opportunities) }
            { text_block("Regional Translation", trend.regional_translation.as_deref().map(Html::from)) }
            if let Some(statistics) = trend.statistics.as_ref() {
                <section>
                    <h3 class="mb-2 font-semibold">{"Statistics"}</h3>
                    <ul class="space-y-1 text-sm">
                        { for stat_rows(statistics).into_iter().map(stat_row) }
                    </ul>
                </section>
            }
            if !trend.sources.is_empty() {
                <section>
                    <h3 class="mb-2 font-semibold">{"Sources"}</h3>
                    <ol class="list-decimal space-y-1 pl-5 text-sm">
                        { for trend.sources.iter().map(source_item) }
                    </ol>
                </section>
            }
            <section>
                <h3 class="mb-2 font-semibold">{"Related Trends"}</h3>
                { related_list(props) }
            </section>
        </>
    }
}

fn descriptions_tab(trend: &Trend, role: Role) -> Html {
    let sections = description_sections(trend, role);
    if sections.is_empty() {
        return html! { <p class="text-sm text-[var(--muted)]">{"No descriptions available"}</p> };
    }
    sections
        .into_iter()
        .map(|section| text_block(section.heading, Some(attributed(section.text, &trend.sources))))
        .collect()
}

fn attributed(text: &str, sources: &[Source]) -> Html {
    attribute(text, sources)
        .into_iter()
        .map(|sentence| {
            html! {
                <>
                    { sentence.text }
                    { for sentence.sources.iter().map(|source| html! {
                        <sup class="ml-0.5 text-[var(--primary)]" title={source.citation()}>
                            if let Some(link) = source.link() {
                                <a href={link.to_string()} target="_blank" rel="noopener noreferrer">
                                    { format!("[{}]", source.citation()) }
                                </a>
                            } else {
                                { format!("[{}]", source.citation()) }
                            }
                        </sup>
                    }) }
                    {" "}
                </>
            }
        })
        .collect()
}

fn text_block(heading: &'static str, body: Option<Html>) -> Html {
    match body {
        Some(body) => html! {
            <section key={heading}>
                <h3 class="mb-2 font-semibold">{ heading }</h3>
                <p class="text-sm leading-relaxed">{ body }</p>
            </section>
        },
        None => Html::default(),
    }
}

fn list_block(heading: &'static str, items: &[String]) -> Html {
    if items.is_empty() {
        return Html::default();
    }
    html! {
        <section>
            <h3 class="mb-2 font-semibold">{ heading }</h3>
            <ul class="list-disc space-y-1 pl-5 text-sm">
                { for items.iter().map(|item| html! { <li>{ item.clone() }</li> }) }
            </ul>
        </section>
    }
}

fn stat_row(row: StatRow) -> Html {
    match row {
        StatRow::Entry {
            label,
            value,
        } => html! {
            <li><span class="font-semibold">{ format!("{label}: ") }</span>{ value }</li>
        },
        StatRow::Figure {
            figure,
            provenance,
        } => html! {
            <li>
                { figure }
                if let Some(provenance) = provenance {
                    <span class="ml-1 text-[var(--muted)]">{ format!("({provenance})") }</span>
                }
            </li>
        },
        StatRow::Text(text) => html! { <li>{ text }</li> },
    }
}

fn source_item(source: &Source) -> Html {
    let label = source.citation();
    let reliability = match source {
        Source::Reference {
            reliability: Some(note),
            ..
        } => Some(note.clone()),
        _ => None,
    };
    html! {
        <li>
            if let Some(link) = source.link() {
                <a class="text-[var(--primary)] hover:underline" href={link.to_string()} target="_blank" rel="noopener noreferrer">
                    { label }
                </a>
            } else {
                { label }
            }
            if let Some(note) = reliability {
                <span class="ml-1 text-xs text-[var(--muted)]">{ format!("({note})") }</span>
            }
        </li>
    }
}

fn related_list(props: &DetailPanelProps) -> Html {
    let Some(related) = props.related.as_ref() else {
        return html! { <LoadingSpinner size={SpinnerSize::Small} label="Loading related trends..." /> };
    };
    if related.is_empty() {
        return html! { <p class="text-sm text-[var(--muted)]">{"No related trends"}</p> };
    }
    html! {
        <ul class="space-y-2">
            { for related.iter().map(|trend| {
                let id = trend.id;
                let on_related = props.on_related.clone();
                html! {
                    <li key={id}>
                        <button
                            type="button"
                            class="w-full rounded-lg border border-[var(--border)] p-3 text-left text-sm hover:border-[var(--primary)]"
                            onclick={Callback::from(move |_| on_related.emit(id))}
                        >
                            <span class="block font-medium">{ trend.title.clone() }</span>
                            <span class="text-xs text-[var(--muted)]">
                                { trend.primary_sub_category().unwrap_or(EMPTY_CELL) }
                            </span>
                        </button>
                    </li>
                }
            }) }
        </ul>
    }
}
