//! Signed-in user and token, kept in localStorage by the login flow.

use trendboard_shared::{
    api::RequestContext,
    users::{Role, User, UserType},
};
use web_sys::Storage;

use crate::config::{API_BASE, TOKEN_KEY, USER_KEY};

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn read(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

/// Context for the next request. The token is read fresh every time so a
/// logout in another tab takes effect immediately.
pub fn request_context() -> RequestContext {
    RequestContext::new(API_BASE, read(TOKEN_KEY))
}

/// User stored at login, if any.
pub fn current_user() -> Option<User> {
    let raw = read(USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(err) => {
            web_sys::console::error_1(&format!("Ignoring malformed stored user: {err}").into());
            None
        },
    }
}

/// Role of the signed-in user. Mock builds act as an admin.
pub fn role() -> Role {
    if cfg!(feature = "mock") {
        return Role::Admin;
    }
    current_user().map_or(Role::Member, |user| Role::from(user.user_type))
}

/// Header label for the signed-in account type.
pub fn role_label() -> &'static str {
    let fallback = if role().is_admin() { UserType::Admin } else { UserType::External };
    current_user().map_or(fallback, |user| user.user_type).header_label()
}

/// Forgets token and user.
pub fn logout() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
