//! Column layout and cell text for the trend table.

use crate::{
    model::{ImpactLabel, Trend, TrendStatus, WireEnum},
    users::Role,
};

/// Shown for missing values.
pub const EMPTY_CELL: &str = "-";
/// Titles longer than this are cut.
pub const TITLE_LIMIT: usize = 70;
/// Skill tags longer than this are cut.
pub const SKILL_LIMIT: usize = 10;

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Row checkbox.
    Select,
    /// Title.
    Title,
    /// Category.
    Category,
    /// Department.
    Department,
    /// Moderation status.
    Status,
    /// Impact score and tier.
    Impact,
    /// First affected skill.
    Skills,
    /// Scope.
    Scope,
    /// Time horizon.
    TimeHorizon,
}

impl Column {
    /// Header text. Empty for the checkbox column.
    pub const fn header(self) -> &'static str {
        match self {
            Column::Select => "",
            Column::Title => "Title",
            Column::Category => "Category",
            Column::Department => "Department",
            Column::Status => "Status",
            Column::Impact => "Impact",
            Column::Skills => "Skills",
            Column::Scope => "Scope",
            Column::TimeHorizon => "Time Horizon",
        }
    }
}

const ADMIN_COLUMNS: &[Column] = &[
    Column::Select,
    Column::Title,
    Column::Category,
    Column::Department,
    Column::Status,
    Column::Impact,
];

const MEMBER_COLUMNS: &[Column] = &[
    Column::Title,
    Column::Category,
    Column::Department,
    Column::Skills,
    Column::Scope,
    Column::TimeHorizon,
];

/// Columns for `role`.
pub fn columns_for(role: Role) -> &'static [Column] {
    if role.is_admin() {
        ADMIN_COLUMNS
    } else {
        MEMBER_COLUMNS
    }
}

/// Cuts `text` to `limit` characters and appends `...` when it was longer.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str("...");
    cut
}

/// Title as shown in a row.
pub fn title_cell(trend: &Trend) -> String {
    truncate(&trend.title, TITLE_LIMIT)
}

/// Upper-cases the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `growth_rate` → `Growth rate`.
pub fn humanize_key(key: &str) -> String {
    capitalize(&key.replace('_', " "))
}

fn or_dash(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map_or_else(|| EMPTY_CELL.to_string(), str::to_string)
}

/// Skills summary: the first skill, cut short, plus the count of the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillsCell {
    /// Possibly truncated first skill, or `-`.
    pub tag: String,
    /// Full first skill for the tooltip.
    pub full: Option<String>,
    /// How many skills were left out.
    pub more: usize,
}

impl SkillsCell {
    /// `tag` followed by `+N` when there are more skills.
    pub fn text(&self) -> String {
        if self.more == 0 {
            self.tag.clone()
        } else {
            format!("{} +{}", self.tag, self.more)
        }
    }
}

/// Builds the skills cell for `trend`.
pub fn skills_cell(trend: &Trend) -> SkillsCell {
    match trend.skills.first() {
        Some(first) => SkillsCell {
            tag: truncate(first, SKILL_LIMIT),
            full: Some(first.clone()),
            more: trend.skills.len() - 1,
        },
        None => SkillsCell {
            tag: EMPTY_CELL.to_string(),
            full: None,
            more: 0,
        },
    }
}

/// Text for any non-checkbox column.
pub fn cell_text(trend: &Trend, column: Column) -> String {
    match column {
        Column::Select => String::new(),
        Column::Title => title_cell(trend),
        Column::Category => or_dash(trend.category.as_deref()),
        Column::Department => or_dash(trend.department_name.as_deref()),
        Column::Status => or_dash(trend.status.map(TrendStatus::label)),
        Column::Impact => impact_text(trend),
        Column::Skills => skills_cell(trend).text(),
        Column::Scope => capitalize(&or_dash(trend.scope.map(WireEnum::as_str))),
        Column::TimeHorizon => or_dash(trend.time_horizon.map(WireEnum::label)),
    }
}

/// `8.5 (High)`, or just the tier when there is no score.
pub fn impact_text(trend: &Trend) -> String {
    let label = trend.impact().label();
    match trend.impact_score {
        Some(score) => format!("{} ({label})", format_score(score)),
        None => label.to_string(),
    }
}

/// Drops a trailing `.0`.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

/// CSS modifier for an impact tier.
pub const fn impact_class(label: ImpactLabel) -> &'static str {
    match label {
        ImpactLabel::Low => "impact-low",
        ImpactLabel::Medium => "impact-medium",
        ImpactLabel::High => "impact-high",
        ImpactLabel::VeryHigh => "impact-very-high",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn trend(value: serde_json::Value) -> Trend {
        serde_json::from_value(value).expect("trend")
    }

    #[test]
    fn admin_and_member_columns_differ() {
        let admin = columns_for(Role::Admin);
        let member = columns_for(Role::Member);
        for shared in [Column::Title, Column::Category, Column::Department] {
            assert!(admin.contains(&shared));
            assert!(member.contains(&shared));
        }
        assert!(admin.contains(&Column::Status) && admin.contains(&Column::Impact));
        assert!(!member.contains(&Column::Status) && !member.contains(&Column::Select));
        assert!(member.contains(&Column::Skills) && member.contains(&Column::TimeHorizon));
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "x".repeat(75);
        let cell = title_cell(&trend(json!({"id": 1, "title": long})));
        assert_eq!(cell.chars().count(), TITLE_LIMIT + 3);
        assert!(cell.ends_with("..."));
        assert_eq!(title_cell(&trend(json!({"id": 2, "title": "Short"}))), "Short");
    }

    #[test]
    fn skills_cell_counts_the_rest() {
        let cell = skills_cell(&trend(json!({
            "id": 1,
            "gevolgen_skills": ["Data literacy", "Welding", "Coding"]
        })));
        assert_eq!(cell.tag, "Data liter...");
        assert_eq!(cell.more, 2);
        assert_eq!(cell.text(), "Data liter... +2");

        let empty = skills_cell(&trend(json!({"id": 2})));
        assert_eq!(empty.text(), EMPTY_CELL);
    }

    #[test]
    fn member_cells_format_scope_and_horizon() {
        let t = trend(json!({"id": 1, "scope": "international", "time_horizon": "long"}));
        assert_eq!(cell_text(&t, Column::Scope), "International");
        assert_eq!(cell_text(&t, Column::TimeHorizon), "Long term");
        assert_eq!(cell_text(&t, Column::Department), EMPTY_CELL);
    }

    #[test]
    fn impact_cell_shows_score_and_tier() {
        assert_eq!(impact_text(&trend(json!({"id": 1, "impact_score": 7}))), "7 (High)");
        assert_eq!(impact_text(&trend(json!({"id": 1, "impact_score": 4.5}))), "4.5 (Medium)");
        assert_eq!(humanize_key("growth_rate"), "Growth rate");
    }
}
