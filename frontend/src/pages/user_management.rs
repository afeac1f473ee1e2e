use trendboard_shared::{
    notify::Notice,
    users::{activation_message, generate_password, NewUser, User, UserId, UserPatch, UserType, GENDERS},
};
use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::{
    api,
    components::{loading_spinner::LoadingSpinner, toast::Toast},
    hooks::confirm,
};

/// Bumped after every successful mutation; the list refetches on change.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Reload(u32);

impl Reducible for Reload {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

fn random_index(bound: usize) -> usize {
    ((js_sys::Math::random() * bound as f64) as usize).min(bound.saturating_sub(1))
}

fn on_text(form: &UseStateHandle<NewUser>, set: fn(&mut NewUser, String)) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        let mut next = (*form).clone();
        set(&mut next, input.value());
        form.set(next);
    })
}

fn on_choice(form: &UseStateHandle<NewUser>, set: fn(&mut NewUser, String)) -> Callback<Event> {
    let form = form.clone();
    Callback::from(move |event: Event| {
        let select: HtmlSelectElement = event.target_unchecked_into();
        let mut next = (*form).clone();
        set(&mut next, select.value());
        form.set(next);
    })
}

#[function_component(UserManagementPage)]
pub fn user_management_page() -> Html {
    let users = use_state(Vec::<User>::new);
    let loading = use_state(|| true);
    let reload = use_reducer(Reload::default);
    let notice = use_state(|| None::<Notice>);
    let show_form = use_state(|| false);
    let form = use_state(NewUser::default);
    let form_error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    {
        let users = users.clone();
        let loading = loading.clone();
        let notice = notice.clone();
        use_effect_with(reload.0, move |_| {
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_users().await {
                    Ok(list) => users.set(list),
                    Err(err) => {
                        web_sys::console::error_1(&format!("Failed to fetch users: {err}").into());
                        notice.set(Some(Notice::error("Failed to fetch users")));
                    },
                }
                loading.set(false);
            });
            || ()
        });
    }

    let refresh = {
        let reload = reload.dispatcher();
        move || reload.dispatch(())
    };

    let toggle_form = {
        let show_form = show_form.clone();
        let form = form.clone();
        let form_error = form_error.clone();
        Callback::from(move |_| {
            show_form.set(!*show_form);
            form.set(NewUser::default());
            form_error.set(None);
        })
    };

    let on_generate = {
        let form = form.clone();
        let form_error = form_error.clone();
        Callback::from(move |_| {
            let mut next = (*form).clone();
            next.password = generate_password(random_index);
            form.set(next);
            form_error.set(None);
        })
    };

    let on_submit = {
        let form = form.clone();
        let form_error = form_error.clone();
        let submitting = submitting.clone();
        let show_form = show_form.clone();
        let notice = notice.clone();
        let refresh = refresh.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if let Err(err) = form.validate() {
                form_error.set(Some(err.to_string()));
                return;
            }
            form_error.set(None);
            submitting.set(true);
            let user = (*form).clone().normalized();
            let form = form.clone();
            let submitting = submitting.clone();
            let show_form = show_form.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::create_user(&user).await {
                    Ok(()) => {
                        notice.set(Some(Notice::success("User created successfully!")));
                        form.set(NewUser::default());
                        show_form.set(false);
                        refresh();
                    },
                    Err(err) => {
                        notice.set(Some(Notice::error(format!("Failed to create user: {}", err.user_message()))));
                    },
                }
                submitting.set(false);
            });
        })
    };

    let toggle_active = {
        let notice = notice.clone();
        let refresh = refresh.clone();
        move |id: UserId, is_active: bool| {
            let notice = notice.clone();
            let refresh = refresh.clone();
            Callback::from(move |_| {
                let id = id.clone();
                let notice = notice.clone();
                let refresh = refresh.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match api::update_user(&id, &UserPatch::active(is_active)).await {
                        Ok(()) => {
                            notice.set(Some(Notice::success(activation_message(is_active))));
                            refresh();
                        },
                        Err(err) => notice.set(Some(Notice::error(format!(
                            "Failed to update user status: {}",
                            err.user_message()
                        )))),
                    }
                });
            })
        }
    };

    let delete = {
        let notice = notice.clone();
        let refresh = refresh.clone();
        move |id: UserId| {
            let notice = notice.clone();
            let refresh = refresh.clone();
            Callback::from(move |_| {
                if !confirm("Are you sure you want to delete this user?") {
                    return;
                }
                let id = id.clone();
                let notice = notice.clone();
                let refresh = refresh.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match api::delete_user(&id).await {
                        Ok(()) => {
                            notice.set(Some(Notice::success("User deleted successfully!")));
                            refresh();
                        },
                        Err(err) => notice.set(Some(Notice::error(format!(
                            "Failed to delete user: {}",
                            err.user_message()
                        )))),
                    }
                });
            })
        }
    };

    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    let input_class = "w-full rounded-lg border border-[var(--border)] px-3 py-2 text-sm";

    html! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"User Management"}</h1>
                <button
                    type="button"
                    class="rounded-lg bg-[var(--primary)] px-4 py-2 text-sm font-semibold text-white"
                    onclick={toggle_form}
                >
                    { if *show_form { "Cancel" } else { "Add User" } }
                </button>
            </div>

            if *show_form {
                <form class="grid gap-4 rounded-xl border border-[var(--border)] bg-[var(--surface)] p-5 md:grid-cols-2" onsubmit={on_submit}>
                    <label class="text-sm">
                        {"Email *"}
                        <input
                            class={input_class}
                            type="email"
                            value={form.email.clone()}
                            oninput={on_text(&form, |user, value| user.email = value)}
                        />
                    </label>
                    <label class="text-sm">
                        {"Password *"}
                        <div class="flex gap-2">
                            <input
                                class={input_class}
                                type="text"
                                value={form.password.clone()}
                                oninput={on_text(&form, |user, value| user.password = value)}
                            />
                            <button type="button" class="shrink-0 rounded-lg border border-[var(--border)] px-3 text-sm" onclick={on_generate}>
                                {"Generate"}
                            </button>
                        </div>
                    </label>
                    <label class="text-sm">
                        {"First Name *"}
                        <input
                            class={input_class}
                            value={form.first_name.clone()}
                            oninput={on_text(&form, |user, value| user.first_name = value)}
                        />
                    </label>
                    <label class="text-sm">
                        {"Last Name *"}
                        <input
                            class={input_class}
                            value={form.last_name.clone()}
                            oninput={on_text(&form, |user, value| user.last_name = value)}
                        />
                    </label>
                    <label class="text-sm">
                        {"User Type *"}
                        <select
                            class={input_class}
                            onchange={on_choice(&form, |user, value| {
                                if let Some(kind) = UserType::parse(&value) {
                                    user.user_type = kind;
                                }
                            })}
                        >
                            { for UserType::ALL.iter().map(|kind| html! {
                                <option value={kind.as_str()} selected={form.user_type == *kind}>{ kind.label() }</option>
                            }) }
                        </select>
                    </label>
                    <label class="text-sm">
                        {"Gender"}
                        <select class={input_class} onchange={on_choice(&form, |user, value| user.gender = Some(value))}>
                            <option value="" selected={form.gender.is_none()}>{"Select gender"}</option>
                            { for GENDERS.iter().map(|gender| html! {
                                <option value={*gender} selected={form.gender.as_deref() == Some(*gender)}>{ *gender }</option>
                            }) }
                        </select>
                    </label>
                    <label class="text-sm">
                        {"Date of Birth"}
                        <input
                            class={input_class}
                            type="date"
                            value={form.date_of_birth.clone().unwrap_or_default()}
                            oninput={on_text(&form, |user, value| user.date_of_birth = Some(value))}
                        />
                    </label>
                    <div class="flex items-end justify-end gap-3 md:col-span-2">
                        if let Some(error) = (*form_error).clone() {
                            <p class="mr-auto text-sm text-red-600" role="alert">{ error }</p>
                        }
                        <button
                            type="submit"
                            class="rounded-lg bg-[var(--primary)] px-4 py-2 text-sm font-semibold text-white disabled:opacity-50"
                            disabled={*submitting}
                        >
                            { if *submitting { "Creating..." } else { "Create User" } }
                        </button>
                    </div>
                </form>
            }

            if *loading && users.is_empty() {
                <LoadingSpinner label="Loading users..." />
            } else if users.is_empty() {
                <p class="py-10 text-center text-[var(--muted)]">{"No users found"}</p>
            } else {
                <div class="overflow-x-auto">
                    <table class="w-full text-left text-sm">
                        <thead class="border-b border-[var(--border)] text-xs uppercase tracking-wide text-[var(--muted)]">
                            <tr>
                                <th class="px-3 py-2">{"Name"}</th>
                                <th class="px-3 py-2">{"Email"}</th>
                                <th class="px-3 py-2">{"Type"}</th>
                                <th class="px-3 py-2">{"Status"}</th>
                                <th class="px-3 py-2">{"Created"}</th>
                                <th class="px-3 py-2 text-right">{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for users.iter().map(|user| html! {
                                <tr key={user.id.clone()} class="border-b border-[var(--border)]">
                                    <td class="px-3 py-2 font-medium">{ user.display_name() }</td>
                                    <td class="px-3 py-2">{ user.email.clone() }</td>
                                    <td class="px-3 py-2">{ user.user_type.label() }</td>
                                    <td class="px-3 py-2">
                                        <span class={classes!(
                                            "status-badge",
                                            if user.is_active { "status-confirmed" } else { "status-draft" }
                                        )}>
                                            { if user.is_active { "Active" } else { "Inactive" } }
                                        </span>
                                    </td>
                                    <td class="px-3 py-2">{ user.created_date().unwrap_or("-") }</td>
                                    <td class="space-x-2 px-3 py-2 text-right">
                                        <button
                                            type="button"
                                            class="text-[var(--primary)] hover:underline"
                                            onclick={toggle_active(user.id.clone(), !user.is_active)}
                                        >
                                            { if user.is_active { "Deactivate" } else { "Activate" } }
                                        </button>
                                        <button
                                            type="button"
                                            class="text-red-600 hover:underline"
                                            onclick={delete(user.id.clone())}
                                        >
                                            {"Delete"}
                                        </button>
                                    </td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                </div>
            }
            <Toast notice={(*notice).clone()} on_close={on_dismiss} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_advances_on_every_dispatch() {
        let start = Rc::new(Reload::default());
        // Two completions landing before a re-render still yield two reloads.
        let once = start.clone().reduce(());
        let twice = once.clone().reduce(());
        assert_eq!(*once, Reload(1));
        assert_eq!(*twice, Reload(2));
        assert_eq!(Rc::new(Reload(u32::MAX)).reduce(()).0, 0);
    }
}
