use trendboard_shared::notify::{Notice, NoticeKind, TOAST_TIMEOUT_MS};
use yew::prelude::*;
use yew_hooks::prelude::use_timeout;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notice: Option<Notice>,
    pub on_close: Callback<()>,
}

/// Bottom-corner notification that closes itself after
/// [`TOAST_TIMEOUT_MS`].
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let auto_timeout = {
        let on_close = props.on_close.clone();
        use_timeout(move || on_close.emit(()), TOAST_TIMEOUT_MS)
    };

    {
        let auto_timeout = auto_timeout.clone();
        use_effect_with(props.notice.clone(), move |notice| {
            if notice.is_some() {
                auto_timeout.reset();
            } else {
                auto_timeout.cancel();
            }
        });
    }

    let Some(notice) = props.notice.as_ref() else {
        return Html::default();
    };

    let tone = match notice.kind {
        NoticeKind::Success => "bg-emerald-600",
        NoticeKind::Error => "bg-red-600",
        NoticeKind::Info => "bg-slate-700",
    };
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div
            class={classes!(
                "toast",
                notice.kind.class(),
                tone,
                "fixed",
                "bottom-6",
                "right-6",
                "z-50",
                "flex",
                "items-start",
                "gap-3",
                "rounded-xl",
                "px-5",
                "py-4",
                "text-sm",
                "text-white",
                "shadow-xl",
                "max-w-md"
            )}
            role="alert"
            aria-live="assertive"
        >
            <p class="flex-1">{ notice.message.clone() }</p>
            <button
                type="button"
                class="ml-2 inline-flex h-6 w-6 items-center justify-center rounded-full hover:bg-white/20"
                aria-label="Close notification"
                onclick={close}
            >
                {"×"}
            </button>
        </div>
    }
}
