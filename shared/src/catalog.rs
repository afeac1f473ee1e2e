//! Options offered by the filter controls.
//!
//! Departments, categories and subcategories come from the server; the other
//! fields use fixed lists. Category and subcategory options narrow with the
//! parent selection, which is derived on every call instead of being stored.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    filters::{FilterField, FilterState},
    model::{Category, Department, ImpactLabel, Scope, Subcategory, TimeHorizon, TrendStatus, WireEnum},
};

/// One entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value stored in the filter state.
    pub key: String,
    /// Text shown to the user.
    pub label: String,
}

impl SelectOption {
    /// Option whose label differs from its key.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Option labelled by its own key.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            key: value,
        }
    }

    fn from_wire<T: WireEnum>(value: T) -> Self {
        Self::new(value.as_str(), value.label())
    }
}

/// Options for one of the fixed-value fields.
pub fn static_options<T: WireEnum>() -> Vec<SelectOption> {
    T::ALL.iter().copied().map(SelectOption::from_wire).collect()
}

/// Server-supplied catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCatalog {
    /// Active departments.
    pub departments: Vec<Department>,
    /// Categories with their parent department.
    pub categories: Vec<Category>,
    /// Subcategories with their parent category.
    pub subcategories: Vec<Subcategory>,
}

impl OptionCatalog {
    /// Every department.
    pub fn department_options(&self) -> Vec<SelectOption> {
        dedup(self.departments.iter().map(|dept| dept.name.as_str()))
    }

    /// Categories under the selected departments, or all of them when no
    /// department is selected.
    pub fn category_options(&self, filters: &FilterState) -> Vec<SelectOption> {
        let parents = filters.selected(FilterField::Department);
        dedup(
            self.categories
                .iter()
                .filter(|cat| under(parents, cat.department.as_deref()))
                .map(|cat| cat.category_name.as_str()),
        )
    }

    /// Subcategories under the selected categories, or all of them when no
    /// category is selected.
    pub fn subcategory_options(&self, filters: &FilterState) -> Vec<SelectOption> {
        let parents = filters.selected(FilterField::Category);
        dedup(
            self.subcategories
                .iter()
                .filter(|sub| under(parents, sub.category_name.as_deref()))
                .map(|sub| sub.sub_category_name.as_str()),
        )
    }

    /// Options for any field.
    pub fn options_for(&self, field: FilterField, filters: &FilterState) -> Vec<SelectOption> {
        match field {
            FilterField::Department => self.department_options(),
            FilterField::Category => self.category_options(filters),
            FilterField::SubCategory => self.subcategory_options(filters),
            FilterField::TimeHorizon => static_options::<TimeHorizon>(),
            FilterField::Scope => static_options::<Scope>(),
            FilterField::Impact => static_options::<ImpactLabel>(),
            FilterField::Status => static_options::<TrendStatus>(),
        }
    }
}

fn under(parents: &BTreeSet<String>, parent: Option<&str>) -> bool {
    parents.is_empty() || parent.is_some_and(|parent| parents.contains(parent))
}

fn dedup<'a>(names: impl Iterator<Item = &'a str>) -> Vec<SelectOption> {
    let mut seen = HashSet::new();
    names
        .map(str::trim)
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(SelectOption::plain)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterPatch;

    fn catalog() -> OptionCatalog {
        OptionCatalog {
            departments: vec![
                Department {
                    id: 1,
                    name: "IT".into(),
                },
                Department {
                    id: 2,
                    name: "HR".into(),
                },
            ],
            categories: vec![
                Category {
                    id: 1,
                    category_name: "Cloud".into(),
                    department: Some("IT".into()),
                },
                Category {
                    id: 2,
                    category_name: "Security".into(),
                    department: Some("IT".into()),
                },
                Category {
                    id: 3,
                    category_name: "Recruiting".into(),
                    department: Some("HR".into()),
                },
            ],
            subcategories: vec![
                Subcategory {
                    id: 1,
                    sub_category_name: "Zero trust".into(),
                    category_name: Some("Security".into()),
                },
                Subcategory {
                    id: 2,
                    sub_category_name: "Serverless".into(),
                    category_name: Some("Cloud".into()),
                },
            ],
        }
    }

    fn keys(options: &[SelectOption]) -> Vec<&str> {
        options.iter().map(|opt| opt.key.as_str()).collect()
    }

    #[test]
    fn categories_unfiltered_without_department_selection() {
        let options = catalog().category_options(&FilterState::default());
        assert_eq!(keys(&options), vec!["Cloud", "Security", "Recruiting"]);
    }

    #[test]
    fn department_selection_narrows_categories_but_keeps_stale_selection() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(
            FilterPatch::new()
                .set(FilterField::Category, ["Recruiting"])
                .set(FilterField::Department, ["IT"]),
        );

        let options = catalog().category_options(&filters);
        assert_eq!(keys(&options), vec!["Cloud", "Security"]);
        assert!(filters.selected(FilterField::Category).contains("Recruiting"));
    }

    #[test]
    fn category_selection_narrows_subcategories() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Category, ["Security"]));
        let options = catalog().subcategory_options(&filters);
        assert_eq!(keys(&options), vec!["Zero trust"]);
    }

    #[test]
    fn static_fields_use_wire_values_as_keys() {
        let options = catalog().options_for(FilterField::TimeHorizon, &FilterState::default());
        assert_eq!(keys(&options), vec!["short", "medium", "long"]);
        assert_eq!(options[0].label, "Short term");

        let impact = catalog().options_for(FilterField::Impact, &FilterState::default());
        assert_eq!(impact.last().map(|opt| opt.key.as_str()), Some("Very High"));
    }
}
