use trendboard_shared::query::{PageSize, PageSlot, Pagination};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationBarProps {
    pub pagination: Pagination,
    pub on_page_change: Callback<u32>,
    pub on_page_size_change: Callback<PageSize>,
}

#[function_component(PaginationBar)]
pub fn pagination_bar(props: &PaginationBarProps) -> Html {
    let pagination = props.pagination;
    let total_pages = pagination.total_pages();
    let current_page = pagination.page().clamp(1, total_pages);
    let on_page_change = props.on_page_change.clone();

    let prev_disabled = current_page <= 1;
    let next_disabled = current_page >= total_pages;

    let prev_onclick = {
        let on_page_change = on_page_change.clone();
        Callback::from(move |_| {
            if current_page > 1 {
                on_page_change.emit(current_page - 1);
            }
        })
    };

    let next_onclick = {
        let on_page_change = on_page_change.clone();
        Callback::from(move |_| {
            if current_page < total_pages {
                on_page_change.emit(current_page + 1);
            }
        })
    };

    let on_size_change = {
        let on_page_size_change = props.on_page_size_change.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            if let Some(size) = select
                .value()
                .parse::<u32>()
                .ok()
                .and_then(|raw| PageSize::try_from(raw).ok())
            {
                on_page_size_change.emit(size);
            }
        })
    };

    let base_btn_classes = classes!(
        "inline-flex",
        "items-center",
        "justify-center",
        "min-w-[2.5rem]",
        "h-9",
        "px-3",
        "rounded-lg",
        "border",
        "border-[var(--border)]",
        "bg-[var(--surface)]",
        "text-[var(--text)]",
        "text-sm",
        "font-semibold",
        "shadow-sm",
        "transition-all",
        "duration-200",
        "hover:border-[var(--primary)]",
        "hover:text-[var(--primary)]",
        "disabled:opacity-50",
        "disabled:cursor-not-allowed"
    );

    html! {
        <div class="flex flex-wrap items-center justify-between gap-4 py-4">
            <div class="flex items-center gap-3 text-sm text-[var(--muted)]">
                <label for="page-size">{"Rows per page"}</label>
                <select id="page-size" class="rounded-lg border border-[var(--border)] px-2 py-1" onchange={on_size_change}>
                    { for PageSize::ALL.iter().map(|size| html! {
                        <option
                            value={size.get().to_string()}
                            selected={*size == pagination.page_size()}
                        >
                            { size.get() }
                        </option>
                    }) }
                </select>
                if let Some(summary) = pagination.summary() {
                    <span>{ summary }</span>
                }
            </div>
            if total_pages > 1 {
                <nav class="flex flex-wrap items-center gap-2" aria-label="Pagination">
                    <button
                        type="button"
                        class={base_btn_classes.clone()}
                        disabled={prev_disabled}
                        onclick={prev_onclick}
                        aria-label="Previous page"
                    >
                        {"<"}
                    </button>
                    { for pagination.slots().into_iter().map(|slot| match slot {
                        PageSlot::Page(page) => {
                            let page_classes = classes!(
                                base_btn_classes.clone(),
                                if page == current_page {
                                    "bg-[var(--primary)] text-white border-transparent cursor-default pointer-events-none"
                                } else {
                                    ""
                                }
                            );
                            let onclick = {
                                let on_page_change = on_page_change.clone();
                                Callback::from(move |_| on_page_change.emit(page))
                            };

                            html! {
                                <button
                                    key={format!("page-{page}")}
                                    type="button"
                                    class={page_classes}
                                    aria-label={format!("Go to page {page}")}
                                    aria-current={if page == current_page {
                                        Some(AttrValue::from("page"))
                                    } else {
                                        None
                                    }}
                                    disabled={page == current_page}
                                    onclick={onclick}
                                >
                                    { page }
                                </button>
                            }
                        }
                        PageSlot::Ellipsis(id) => html! {
                            <span
                                key={format!("ellipsis-{id}-{current_page}")}
                                class={classes!(base_btn_classes.clone(), "select-none", "opacity-60", "pointer-events-none")}
                                aria-hidden="true"
                            >
                                {"..."}
                            </span>
                        },
                    }) }
                    <button
                        type="button"
                        class={base_btn_classes.clone()}
                        disabled={next_disabled}
                        onclick={next_onclick}
                        aria-label="Next page"
                    >
                        {">"}
                    </button>
                </nav>
            }
        </div>
    }
}
