use std::collections::BTreeSet;

use trendboard_shared::{
    catalog::SelectOption,
    multi_select::{display_text, toggle, NO_OPTIONS},
};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MultiSelectProps {
    pub label: AttrValue,
    pub placeholder: AttrValue,
    pub options: Vec<SelectOption>,
    pub selected: BTreeSet<String>,
    pub on_change: Callback<BTreeSet<String>>,
}

/// Dropdown of checkboxes. Clicking outside the open list closes it.
#[function_component(MultiSelect)]
pub fn multi_select(props: &MultiSelectProps) -> Html {
    let open = use_state(|| false);

    let toggle_open = {
        let open = open.clone();
        Callback::from(move |_| open.set(!*open))
    };
    let close = {
        let open = open.clone();
        Callback::from(move |_| open.set(false))
    };

    let summary = display_text(&props.placeholder, &props.options, &props.selected);
    let has_selection = !props.selected.is_empty();

    html! {
        <div class="multi-select relative min-w-[12rem]">
            <span class="mb-1 block text-xs font-semibold uppercase tracking-wide text-[var(--muted)]">
                { props.label.clone() }
            </span>
            <button
                type="button"
                class={classes!(
                    "flex",
                    "w-full",
                    "items-center",
                    "justify-between",
                    "gap-2",
                    "rounded-lg",
                    "border",
                    "border-[var(--border)]",
                    "bg-[var(--surface)]",
                    "px-3",
                    "py-2",
                    "text-left",
                    "text-sm",
                    if has_selection { "text-[var(--text)]" } else { "text-[var(--muted)]" }
                )}
                aria-haspopup="listbox"
                aria-expanded={open.to_string()}
                onclick={toggle_open}
            >
                <span class="truncate">{ summary }</span>
                <span aria-hidden="true">{ if *open { "▴" } else { "▾" } }</span>
            </button>
            if *open {
                <div class="fixed inset-0 z-10" onclick={close} />
                <ul
                    class="absolute z-20 mt-1 max-h-64 w-full overflow-y-auto rounded-lg border border-[var(--border)] bg-[var(--surface)] py-1 shadow-lg"
                    role="listbox"
                    aria-multiselectable="true"
                >
                    if props.options.is_empty() {
                        <li class="px-3 py-2 text-sm text-[var(--muted)]">{ NO_OPTIONS }</li>
                    } else {
                        { for props.options.iter().map(|option| {
                            let checked = props.selected.contains(&option.key);
                            let onclick = {
                                let selected = props.selected.clone();
                                let key = option.key.clone();
                                let on_change = props.on_change.clone();
                                Callback::from(move |_| on_change.emit(toggle(&selected, &key)))
                            };
                            html! {
                                <li
                                    key={option.key.clone()}
                                    class="flex cursor-pointer items-center gap-2 px-3 py-2 text-sm hover:bg-[var(--surface-alt)]"
                                    role="option"
                                    aria-selected={checked.to_string()}
                                    onclick={onclick}
                                >
                                    <input type="checkbox" checked={checked} readonly={true} tabindex="-1" />
                                    <span>{ option.label.clone() }</span>
                                </li>
                            }
                        }) }
                    }
                </ul>
            }
        </div>
    }
}
