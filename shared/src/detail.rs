//! Detail panel state and the content it shows.

use serde_json::Value;

use crate::{
    model::{Statistics, Trend, TrendId},
    table::humanize_key,
    users::Role,
};

/// Related trends shown under the detail view.
pub const RELATED_LIMIT: usize = 3;

/// Tabs of the detail panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailTab {
    /// Trend fields.
    #[default]
    Details,
    /// The three audience descriptions, admin only.
    AllDescriptions,
}

impl DetailTab {
    /// Tab caption.
    pub const fn label(self) -> &'static str {
        match self {
            DetailTab::Details => "Details",
            DetailTab::AllDescriptions => "All Descriptions",
        }
    }

    /// Tabs offered to `role`.
    pub fn available(role: Role) -> &'static [DetailTab] {
        if role.is_admin() {
            &[DetailTab::Details, DetailTab::AllDescriptions]
        } else {
            &[DetailTab::Details]
        }
    }
}

/// `Closed → Open(trend)`, with related lookups kept alongside.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailPanel {
    /// Nothing selected.
    #[default]
    Closed,
    /// Showing `trend`.
    Open {
        /// The trend on display.
        trend: Box<Trend>,
        /// Active tab.
        tab: DetailTab,
        /// Related trends, `None` while the lookup is in flight.
        related: Option<Vec<Trend>>,
    },
}

impl DetailPanel {
    /// Opens on `trend`, or swaps the trend of an already open panel. Either
    /// way the related list is reloaded and the Details tab shows.
    pub fn open(&mut self, trend: Trend) {
        *self = DetailPanel::Open {
            trend: Box::new(trend),
            tab: DetailTab::Details,
            related: None,
        };
    }

    /// Closes the panel.
    pub fn close(&mut self) {
        *self = DetailPanel::Closed;
    }

    /// Whether the page behind has to stop scrolling.
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    /// Whether a trend is on display.
    pub fn is_open(&self) -> bool {
        matches!(self, DetailPanel::Open { .. })
    }

    /// Trend on display.
    pub fn trend(&self) -> Option<&Trend> {
        match self {
            DetailPanel::Open {
                trend, ..
            } => Some(trend.as_ref()),
            DetailPanel::Closed => None,
        }
    }

    /// Id of the trend on display.
    pub fn trend_id(&self) -> Option<TrendId> {
        self.trend().map(|trend| trend.id)
    }

    /// Switches tab, ignoring tabs `role` may not see.
    pub fn select_tab(&mut self, next: DetailTab, role: Role) {
        if let DetailPanel::Open {
            tab, ..
        } = self
        {
            if DetailTab::available(role).contains(&next) {
                *tab = next;
            }
        }
    }

    /// Active tab.
    pub fn tab(&self) -> Option<DetailTab> {
        match self {
            DetailPanel::Open {
                tab, ..
            } => Some(*tab),
            DetailPanel::Closed => None,
        }
    }

    /// Stores a related lookup for the trend on display. Lookups for any
    /// other trend are dropped.
    pub fn set_related(&mut self, for_trend: TrendId, candidates: Vec<Trend>) -> bool {
        match self {
            DetailPanel::Open {
                trend,
                related,
                ..
            } if trend.id == for_trend => {
                *related = Some(pick_related(trend, candidates));
                true
            },
            _ => false,
        }
    }

    /// Related trends, `None` while loading or closed.
    pub fn related(&self) -> Option<&[Trend]> {
        match self {
            DetailPanel::Open {
                related, ..
            } => related.as_deref(),
            DetailPanel::Closed => None,
        }
    }
}

/// Drops `trend` itself and keeps the first [`RELATED_LIMIT`] candidates.
pub fn pick_related(trend: &Trend, candidates: Vec<Trend>) -> Vec<Trend> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.id != trend.id)
        .take(RELATED_LIMIT)
        .collect()
}

/// A titled block of description text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionSection<'a> {
    /// Audience heading.
    pub heading: &'static str,
    /// Body text.
    pub text: &'a str,
}

/// Descriptions visible to `role`.
///
/// Admins get every audience variant that is present; everyone else gets the
/// single description meant for them.
pub fn description_sections(trend: &Trend, role: Role) -> Vec<DescriptionSection<'_>> {
    if !role.is_admin() {
        return trend
            .public_description()
            .map(|text| DescriptionSection {
                heading: "Description",
                text,
            })
            .into_iter()
            .collect();
    }

    let Some(all) = trend.descriptions.as_ref() else {
        return trend
            .description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(|text| DescriptionSection {
                heading: "Description",
                text,
            })
            .into_iter()
            .collect();
    };
    [
        ("Internal Teacher", all.internal_teacher.as_deref()),
        ("Internal Business", all.internal_business.as_deref()),
        ("External User", all.external.as_deref()),
    ]
    .into_iter()
    .filter_map(|(heading, text)| {
        text.filter(|text| !text.trim().is_empty())
            .map(|text| DescriptionSection {
                heading,
                text,
            })
    })
    .collect()
}

/// One row of rendered statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatRow {
    /// Labelled value.
    Entry {
        /// Humanized key.
        label: String,
        /// Rendered value.
        value: String,
    },
    /// A figure with its provenance.
    Figure {
        /// The figure.
        figure: String,
        /// `source, year` when known.
        provenance: Option<String>,
    },
    /// Free text.
    Text(String),
}

/// Flattens statistics into display rows.
pub fn stat_rows(statistics: &Statistics) -> Vec<StatRow> {
    match statistics {
        Statistics::Entries(map) => map
            .iter()
            .map(|(key, value)| StatRow::Entry {
                label: humanize_key(key),
                value: match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                },
            })
            .collect(),
        Statistics::Figures(figures) => figures
            .iter()
            .map(|figure| {
                let provenance = match (figure.source.as_deref(), figure.year.as_deref()) {
                    (Some(source), Some(year)) => Some(format!("{source}, {year}")),
                    (Some(source), None) => Some(source.to_string()),
                    (None, Some(year)) => Some(year.to_string()),
                    (None, None) => None,
                };
                StatRow::Figure {
                    figure: figure.figure.clone(),
                    provenance,
                }
            })
            .collect(),
        Statistics::Text(text) => vec![StatRow::Text(text.clone())],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn trend(value: Value) -> Trend {
        serde_json::from_value(value).expect("trend")
    }

    #[test]
    fn open_close_and_scroll_lock() {
        let mut panel = DetailPanel::default();
        assert!(!panel.scroll_locked());

        panel.open(trend(json!({"id": 1})));
        assert!(panel.scroll_locked());
        assert_eq!(panel.trend_id(), Some(1));

        panel.close();
        assert!(!panel.scroll_locked());
        assert_eq!(panel.trend(), None);
    }

    #[test]
    fn selecting_related_swaps_trend_without_closing() {
        let mut panel = DetailPanel::default();
        panel.open(trend(json!({"id": 1})));
        panel.select_tab(DetailTab::AllDescriptions, Role::Admin);
        assert!(panel.set_related(1, vec![trend(json!({"id": 2}))]));

        panel.open(trend(json!({"id": 2})));
        assert!(panel.is_open());
        assert_eq!(panel.trend_id(), Some(2));
        assert_eq!(panel.tab(), Some(DetailTab::Details));
        assert_eq!(panel.related(), None);
    }

    #[test]
    fn related_lookup_for_previous_trend_is_dropped() {
        let mut panel = DetailPanel::default();
        panel.open(trend(json!({"id": 2})));
        assert!(!panel.set_related(1, vec![trend(json!({"id": 5}))]));
        assert_eq!(panel.related(), None);
    }

    #[test]
    fn related_excludes_self_and_caps_at_three() {
        let current = trend(json!({"id": 1}));
        let candidates = (1..=5).map(|id| trend(json!({"id": id}))).collect();
        let picked: Vec<_> = pick_related(&current, candidates).iter().map(|t| t.id).collect();
        assert_eq!(picked, vec![2, 3, 4]);
    }

    #[test]
    fn members_cannot_open_all_descriptions_tab() {
        let mut panel = DetailPanel::default();
        panel.open(trend(json!({"id": 1})));
        panel.select_tab(DetailTab::AllDescriptions, Role::Member);
        assert_eq!(panel.tab(), Some(DetailTab::Details));
    }

    #[test]
    fn description_sections_follow_role() {
        let admin_view = trend(json!({
            "id": 1,
            "descriptions": {"internal_teacher": "For teachers", "internal_business": "", "external": "For everyone"}
        }));
        let admin: Vec<_> = description_sections(&admin_view, Role::Admin)
            .into_iter()
            .map(|s| s.heading)
            .collect();
        assert_eq!(admin, vec!["Internal Teacher", "External User"]);

        let member = description_sections(&admin_view, Role::Member);
        assert_eq!(member.len(), 1);
        assert_eq!(member[0].text, "For everyone");

        let single = trend(json!({"id": 2, "description": "Mine"}));
        assert_eq!(description_sections(&single, Role::Member)[0].text, "Mine");
    }

    #[test]
    fn statistics_render_as_rows() {
        let stats = trend(json!({
            "id": 1,
            "cijfers": {"growth_rate": "12%", "jobs": 300}
        }))
        .statistics
        .expect("statistics");
        assert_eq!(
            stat_rows(&stats),
            vec![
                StatRow::Entry {
                    label: "Growth rate".into(),
                    value: "12%".into(),
                },
                StatRow::Entry {
                    label: "Jobs".into(),
                    value: "300".into(),
                },
            ]
        );

        let figures = trend(json!({"id": 2, "cijfers": [{"figure": "40%", "source": "CBS"}]}))
            .statistics
            .expect("figures");
        assert_eq!(
            stat_rows(&figures),
            vec![StatRow::Figure {
                figure: "40%".into(),
                provenance: Some("CBS".into()),
            }]
        );
    }
}
