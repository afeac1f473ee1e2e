use trendboard_shared::{
    model::{TrendStats, WireEnum},
    stats::{category_bars, department_bars, impact_distribution, percent_of_total, Bar},
    table::{format_score, impact_class},
};
use yew::prelude::*;

use crate::components::loading_spinner::{LoadingSpinner, SpinnerSize};

#[derive(Properties, PartialEq)]
pub struct StatsCardsProps {
    pub stats: Option<TrendStats>,
    #[prop_or_default]
    pub loading: bool,
}

/// Summary cards above the listing.
#[function_component(StatsCards)]
pub fn stats_cards(props: &StatsCardsProps) -> Html {
    let Some(stats) = props.stats.as_ref() else {
        return if props.loading {
            html! {
                <div class="flex justify-center py-6">
                    <LoadingSpinner size={SpinnerSize::Small} label="Loading statistics..." />
                </div>
            }
        } else {
            Html::default()
        };
    };

    let total = stats.total_trends;
    let card = classes!(
        "rounded-xl",
        "border",
        "border-[var(--border)]",
        "bg-[var(--surface)]",
        "p-5",
        "shadow-sm"
    );

    html! {
        <section
            class={classes!(
                "grid",
                "gap-4",
                "md:grid-cols-2",
                "xl:grid-cols-4",
                props.loading.then_some("opacity-60")
            )}
            aria-busy={props.loading.to_string()}
        >
            <div class={card.clone()}>
                <h3 class="text-xs font-semibold uppercase tracking-wide text-[var(--muted)]">{"Total Trends"}</h3>
                <p class="mt-2 text-3xl font-bold">{ total }</p>
                <ul class="mt-4 space-y-1 text-sm">
                    { for impact_distribution(stats).into_iter().map(|(label, count)| html! {
                        <li key={label.as_str()} class="flex items-center justify-between">
                            <span class={classes!("impact-badge", impact_class(label))}>{ label.label() }</span>
                            <span>
                                { count }
                                <span class="ml-1 text-[var(--muted)]">
                                    { format!("({:.0}%)", percent_of_total(count, total)) }
                                </span>
                            </span>
                        </li>
                    }) }
                </ul>
            </div>
            <div class={card.clone()}>
                <h3 class="text-xs font-semibold uppercase tracking-wide text-[var(--muted)]">{"By Category"}</h3>
                { bar_list(&category_bars(stats)) }
            </div>
            <div class={card.clone()}>
                <h3 class="text-xs font-semibold uppercase tracking-wide text-[var(--muted)]">{"By Department"}</h3>
                { bar_list(&department_bars(stats)) }
            </div>
            <div class={card}>
                <h3 class="text-xs font-semibold uppercase tracking-wide text-[var(--muted)]">{"Highest Impact"}</h3>
                if stats.highest_impact.is_empty() {
                    <p class="mt-3 text-sm text-[var(--muted)]">{"No trends yet"}</p>
                } else {
                    <ol class="mt-3 space-y-2 text-sm">
                        { for stats.highest_impact.iter().map(|ranked| html! {
                            <li key={ranked.id} class="flex items-start justify-between gap-2">
                                <span class="line-clamp-2">{ ranked.title.clone() }</span>
                                <span class="shrink-0 font-semibold">{ format_score(ranked.impact_score) }</span>
                            </li>
                        }) }
                    </ol>
                }
            </div>
        </section>
    }
}

fn bar_list(bars: &[Bar]) -> Html {
    if bars.is_empty() {
        return html! { <p class="mt-3 text-sm text-[var(--muted)]">{"No data"}</p> };
    }
    html! {
        <ul class="mt-3 space-y-2 text-sm">
            { for bars.iter().map(|bar| html! {
                <li key={bar.label.clone()}>
                    <div class="flex justify-between">
                        <span class="truncate">{ bar.label.clone() }</span>
                        <span>{ bar.count }</span>
                    </div>
                    <div class="mt-1 h-1.5 rounded-full bg-[var(--surface-alt)]">
                        <div
                            class="h-1.5 rounded-full bg-[var(--primary)]"
                            style={format!("width: {:.1}%", bar.percent)}
                        />
                    </div>
                </li>
            }) }
        </ul>
    }
}
