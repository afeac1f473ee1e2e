//! Category → subcategory grouping for the grouped view.

use crate::model::Trend;

/// Group label for trends without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";
/// Group label for trends without a subcategory.
pub const GENERAL: &str = "General";

/// Trends sharing one subcategory.
#[derive(Debug, Clone, PartialEq)]
pub struct SubGroup<'a> {
    /// Subcategory label.
    pub name: String,
    /// Members in listing order.
    pub trends: Vec<&'a Trend>,
}

/// Trends sharing one category.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendGroup<'a> {
    /// Category label.
    pub category: String,
    /// Subgroups in first-seen order.
    pub subgroups: Vec<SubGroup<'a>>,
}

impl TrendGroup<'_> {
    /// Row count shown in the group header. A trend listed under several
    /// subcategories counts once per subgroup.
    pub fn count(&self) -> usize {
        self.subgroups.iter().map(|sub| sub.trends.len()).sum()
    }
}

/// Partitions `trends` by category, then by each of their subcategories.
///
/// A trend with several subcategories is placed in every matching subgroup.
pub fn group_trends(trends: &[Trend]) -> Vec<TrendGroup<'_>> {
    let mut groups: Vec<TrendGroup<'_>> = Vec::new();

    for trend in trends {
        let category = trend.category_name().unwrap_or(UNCATEGORIZED);
        let index = match groups.iter().position(|group| group.category == category) {
            Some(index) => index,
            None => {
                groups.push(TrendGroup {
                    category: category.to_string(),
                    subgroups: Vec::new(),
                });
                groups.len() - 1
            },
        };
        let group = &mut groups[index];

        let mut names: Vec<&str> = Vec::new();
        for name in trend.sub_category.iter().map(|name| name.trim()) {
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        if names.is_empty() {
            names.push(GENERAL);
        }

        for name in names {
            match group.subgroups.iter_mut().find(|sub| sub.name == name) {
                Some(sub) => sub.trends.push(trend),
                None => group.subgroups.push(SubGroup {
                    name: name.to_string(),
                    trends: vec![trend],
                }),
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn trends(values: Vec<Value>) -> Vec<Trend> {
        values
            .into_iter()
            .map(|value| serde_json::from_value(value).expect("trend"))
            .collect()
    }

    #[test]
    fn multi_subcategory_trend_fans_out() {
        let input = trends(vec![json!({"id": 1, "category": "A", "sub_category": ["X", "Y"]})]);
        let groups = group_trends(&input);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "A");
        let names: Vec<_> = groups[0].subgroups.iter().map(|sub| sub.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y"]);
        for sub in &groups[0].subgroups {
            assert_eq!(sub.trends.len(), 1);
            assert_eq!(sub.trends[0].id, 1);
        }
        assert_eq!(groups[0].count(), 2);
    }

    #[test]
    fn missing_labels_use_fallbacks() {
        let input = trends(vec![
            json!({"id": 1}),
            json!({"id": 2, "category": "  ", "sub_category": []}),
            json!({"id": 3, "category": "B", "sub_category": "Z"}),
        ]);
        let groups = group_trends(&input);

        assert_eq!(groups[0].category, UNCATEGORIZED);
        assert_eq!(groups[0].subgroups[0].name, GENERAL);
        assert_eq!(groups[0].subgroups[0].trends.len(), 2);
        assert_eq!(groups[1].category, "B");
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let input = trends(vec![
            json!({"id": 1, "category": "Later", "sub_category": "S"}),
            json!({"id": 2, "category": "Earlier", "sub_category": "S"}),
            json!({"id": 3, "category": "Later", "sub_category": ["S", "S"]}),
        ]);
        let groups = group_trends(&input);
        let order: Vec<_> = groups.iter().map(|group| group.category.as_str()).collect();
        assert_eq!(order, vec!["Later", "Earlier"]);
        assert_eq!(groups[0].subgroups[0].trends.len(), 2);
    }
}
