//! Admin row selection.

use std::collections::BTreeSet;

use crate::model::TrendId;

/// Render state of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckbox {
    /// No visible row is selected.
    Unchecked,
    /// Some, but not all, visible rows are selected.
    Indeterminate,
    /// Every visible row is selected.
    Checked,
}

/// Ids ticked by an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet(BTreeSet<TrendId>);

impl SelectionSet {
    /// Adds or removes `id`.
    pub fn toggle(&mut self, id: TrendId) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    /// Whether `id` is ticked.
    pub fn contains(&self, id: TrendId) -> bool {
        self.0.contains(&id)
    }

    /// Number of ticked rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is ticked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<TrendId> {
        self.0.iter().copied().collect()
    }

    /// Unticks everything.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Unticks `ids`.
    pub fn remove_all(&mut self, ids: &[TrendId]) {
        for id in ids {
            self.0.remove(id);
        }
    }

    /// Header state for the rows currently on screen.
    pub fn header_state(&self, visible: &[TrendId]) -> HeaderCheckbox {
        let picked = visible.iter().filter(|id| self.0.contains(*id)).count();
        match picked {
            0 => HeaderCheckbox::Unchecked,
            n if n == visible.len() => HeaderCheckbox::Checked,
            _ => HeaderCheckbox::Indeterminate,
        }
    }

    /// Header click: clears the visible rows when all of them are ticked,
    /// otherwise ticks all of them. Rows on other pages are left alone.
    pub fn toggle_visible(&mut self, visible: &[TrendId]) {
        if self.header_state(visible) == HeaderCheckbox::Checked {
            for id in visible {
                self.0.remove(id);
            }
        } else {
            self.0.extend(visible.iter().copied());
        }
    }
}
