//! Headless half of the multi-select dropdown.

use std::collections::BTreeSet;

use crate::catalog::SelectOption;

/// Shown instead of the option list when there is nothing to pick.
pub const NO_OPTIONS: &str = "No options";

/// Selection after clicking `key`: the symmetric difference with `{key}`.
pub fn toggle(selected: &BTreeSet<String>, key: &str) -> BTreeSet<String> {
    let mut next = selected.clone();
    if !next.remove(key) {
        next.insert(key.to_string());
    }
    next
}

/// Button text for the closed control.
///
/// Nothing selected shows `placeholder`. A single selection shows its label,
/// falling back to the raw key for values no longer offered. Anything more
/// reads `"{placeholder} ({count})"`.
pub fn display_text(placeholder: &str, options: &[SelectOption], selected: &BTreeSet<String>) -> String {
    match selected.len() {
        0 => placeholder.to_string(),
        1 => {
            let key = selected.iter().next().map(String::as_str).unwrap_or_default();
            options
                .iter()
                .find(|opt| opt.key == key)
                .map(|opt| opt.label.clone())
                .unwrap_or_else(|| key.to_string())
        },
        count => format!("{placeholder} ({count})"),
    }
}
