//! Filter selections for the trend listing.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{Trend, WireEnum};

/// A filterable trend attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    /// `department_name`.
    Department,
    /// `category`.
    Category,
    /// `sub_category`.
    SubCategory,
    /// `time_horizon`.
    TimeHorizon,
    /// `scope`.
    Scope,
    /// `impact_label`.
    Impact,
    /// `status`, admin only and single-valued.
    Status,
}

impl FilterField {
    /// Every field, in query parameter order.
    pub const ALL: [FilterField; 7] = [
        FilterField::Department,
        FilterField::Category,
        FilterField::SubCategory,
        FilterField::TimeHorizon,
        FilterField::Scope,
        FilterField::Impact,
        FilterField::Status,
    ];

    /// Query parameter name.
    pub const fn param(self) -> &'static str {
        match self {
            FilterField::Department => "department_name",
            FilterField::Category => "category",
            FilterField::SubCategory => "sub_category",
            FilterField::TimeHorizon => "time_horizon",
            FilterField::Scope => "scope",
            FilterField::Impact => "impact_label",
            FilterField::Status => "status",
        }
    }

    /// Control label.
    pub const fn label(self) -> &'static str {
        match self {
            FilterField::Department => "Department",
            FilterField::Category => "Category",
            FilterField::SubCategory => "Subcategory",
            FilterField::TimeHorizon => "Time Horizon",
            FilterField::Scope => "Scope",
            FilterField::Impact => "Impact",
            FilterField::Status => "Status",
        }
    }

    /// Scalar fields hold at most one value.
    pub const fn is_scalar(self) -> bool {
        matches!(self, FilterField::Status)
    }

    /// Fields only offered to admins.
    pub const fn admin_only(self) -> bool {
        matches!(self, FilterField::Status)
    }

    fn trend_values(self, trend: &Trend) -> Vec<&str> {
        match self {
            FilterField::Department => trend.department_name.as_deref().into_iter().collect(),
            FilterField::Category => trend.category.as_deref().into_iter().collect(),
            FilterField::SubCategory => trend.sub_category.iter().map(String::as_str).collect(),
            FilterField::TimeHorizon => trend.time_horizon.map(WireEnum::as_str).into_iter().collect(),
            FilterField::Scope => trend.scope.map(WireEnum::as_str).into_iter().collect(),
            FilterField::Impact => vec![trend.impact().as_str()],
            FilterField::Status => trend.status.map(WireEnum::as_str).into_iter().collect(),
        }
    }
}

/// Returned by every mutation that invalidates the current page.
///
/// Feed it to [`crate::query::Pagination::reset`].
#[must_use = "pagination has to go back to page 1 after a filter change"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetPage;

/// Replacement values for a subset of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch(BTreeMap<FilterField, BTreeSet<String>>);

impl FilterPatch {
    /// Empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `field` with `values`. An empty iterator clears the field.
    pub fn set<I, S>(mut self, field: FilterField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(field, values.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the patch touches no field.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Current filter selections. An empty set means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selections: BTreeMap<FilterField, BTreeSet<String>>,
}

static NO_VALUES: BTreeSet<String> = BTreeSet::new();

impl FilterState {
    /// Values currently selected for `field`.
    pub fn selected(&self, field: FilterField) -> &BTreeSet<String> {
        self.selections.get(&field).unwrap_or(&NO_VALUES)
    }

    /// Merges `patch`, replacing each named field wholesale.
    pub fn apply_partial(&mut self, patch: FilterPatch) -> ResetPage {
        for (field, values) in patch.0 {
            let mut values: BTreeSet<String> = values
                .into_iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect();
            if field.is_scalar() {
                values = values.into_iter().take(1).collect();
            }
            if values.is_empty() {
                self.selections.remove(&field);
            } else {
                self.selections.insert(field, values);
            }
        }
        ResetPage
    }

    /// Drops a single value, as the chip close buttons do.
    pub fn remove_value(&mut self, field: FilterField, value: &str) -> ResetPage {
        if let Some(values) = self.selections.get_mut(&field) {
            values.remove(value);
            if values.is_empty() {
                self.selections.remove(&field);
            }
        }
        ResetPage
    }

    /// Resets every field, the status selector included.
    pub fn clear_all(&mut self) -> ResetPage {
        self.selections.clear();
        ResetPage
    }

    /// Badge count: set cardinality for multi-valued fields, 0 or 1 for
    /// scalar ones.
    pub fn active_count(&self) -> usize {
        self.selections
            .iter()
            .map(|(field, values)| {
                if field.is_scalar() {
                    usize::from(!values.is_empty())
                } else {
                    values.len()
                }
            })
            .sum()
    }

    /// Whether "Clear All" should be offered.
    pub fn has_active(&self) -> bool {
        self.active_count() > 0
    }

    /// Non-empty fields with their values, in parameter order.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &BTreeSet<String>)> + '_ {
        self.selections
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(field, values)| (*field, values))
    }

    /// OR within a field, AND across fields.
    pub fn matches(&self, trend: &Trend) -> bool {
        self.active().all(|(field, wanted)| {
            field.trend_values(trend).into_iter().any(|actual| {
                wanted
                    .iter()
                    .any(|value| value == actual || value.eq_ignore_ascii_case(actual))
            })
        })
    }
}

/// How the listing is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Flat paginated table.
    #[default]
    List,
    /// Category, then subcategory.
    Grouped,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Trend {
        serde_json::from_value(json!({
            "id": 1,
            "title": "Warehouse robots",
            "category": "Technology",
            "sub_category": ["AI", "Robotics"],
            "department_name": "IT",
            "scope": "national",
            "impact_score": 8,
            "status": "draft"
        }))
        .expect("trend")
    }

    #[test]
    fn apply_partial_replaces_whole_field() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Category, ["A", "B"]));
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Category, ["C"]));

        let selected: Vec<_> = filters.selected(FilterField::Category).iter().cloned().collect();
        assert_eq!(selected, vec!["C"]);
    }

    #[test]
    fn empty_patch_value_clears_field() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Scope, ["local"]));
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Scope, Vec::<String>::new()));
        assert!(filters.selected(FilterField::Scope).is_empty());
        assert!(!filters.has_active());
    }

    #[test]
    fn active_count_sums_cardinality_and_scalars() {
        let mut filters = FilterState::default();
        assert_eq!(filters.active_count(), 0);

        let _ = filters.apply_partial(
            FilterPatch::new()
                .set(FilterField::Department, ["IT", "HR"])
                .set(FilterField::Impact, ["High"])
                .set(FilterField::Status, ["draft", "confirmed"]),
        );
        // Status keeps a single value.
        assert_eq!(filters.selected(FilterField::Status).len(), 1);
        assert_eq!(filters.active_count(), 4);
        assert!(filters.has_active());
    }

    #[test]
    fn clear_all_empties_every_field() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(
            FilterPatch::new()
                .set(FilterField::Category, ["A"])
                .set(FilterField::Status, ["draft"]),
        );
        let _ = filters.clear_all();
        assert_eq!(filters.active_count(), 0);
        assert!(!filters.has_active());
    }

    #[test]
    fn remove_value_drops_only_that_chip() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Department, ["IT", "HR"]));
        let _ = filters.remove_value(FilterField::Department, "HR");
        let left: Vec<_> = filters.selected(FilterField::Department).iter().cloned().collect();
        assert_eq!(left, vec!["IT"]);
    }

    #[test]
    fn matches_is_or_within_and_across_fields() {
        let trend = sample();
        let mut filters = FilterState::default();
        assert!(filters.matches(&trend));

        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::SubCategory, ["Robotics", "Biotech"]));
        assert!(filters.matches(&trend));

        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Department, ["HR"]));
        assert!(!filters.matches(&trend));

        let _ = filters.apply_partial(
            FilterPatch::new()
                .set(FilterField::Department, ["IT"])
                .set(FilterField::Impact, ["High"])
                .set(FilterField::Scope, ["national"]),
        );
        assert!(filters.matches(&trend));
    }
}
