//! Trend records and catalog entries as delivered by the dashboard API.
//!
//! Upstream payloads are loosely typed: `sub_category` arrives as a string or
//! a list, statistics and sources may be JSON encoded inside a string, and
//! enum columns occasionally carry values nobody agreed on. Everything is
//! normalized here, once, while the payload is deserialized.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Server-assigned trend identifier.
pub type TrendId = i64;

/// A closed set of string values shared between the wire and the filter UI.
pub trait WireEnum: Copy + Sized + 'static {
    /// Field name used in log lines when an unknown value is dropped.
    const FIELD: &'static str;
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Value sent and received over the wire.
    fn as_str(self) -> &'static str;

    /// Human readable label.
    fn label(self) -> &'static str;

    /// Case-insensitive lookup by wire value or label.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|variant| {
            variant.as_str().eq_ignore_ascii_case(raw) || variant.label().eq_ignore_ascii_case(raw)
        })
    }
}

/// How far out a trend is expected to land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeHorizon {
    /// Within a couple of years.
    Short,
    /// Mid-range outlook.
    Medium,
    /// Long-range outlook.
    Long,
}

impl WireEnum for TimeHorizon {
    const ALL: &'static [Self] = &[Self::Short, Self::Medium, Self::Long];
    const FIELD: &'static str = "time_horizon";

    fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Short => "Short term",
            Self::Medium => "Medium term",
            Self::Long => "Long term",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        // Older exports spell the horizon as `short_term`.
        let raw = raw.trim();
        let raw = raw
            .strip_suffix("_term")
            .or_else(|| raw.strip_suffix(" term"))
            .unwrap_or(raw);
        Self::ALL.iter().copied().find(|variant| variant.as_str().eq_ignore_ascii_case(raw))
    }
}

/// Geographic reach of a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Local.
    Local,
    /// Regional.
    Regional,
    /// National.
    National,
    /// International.
    International,
}

impl WireEnum for Scope {
    const ALL: &'static [Self] = &[Self::Local, Self::Regional, Self::National, Self::International];
    const FIELD: &'static str = "scope";

    fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Regional => "regional",
            Self::National => "national",
            Self::International => "international",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Regional => "Regional",
            Self::National => "National",
            Self::International => "International",
        }
    }
}

/// Severity tier shown next to the numeric impact score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ImpactLabel {
    /// Score below 4.
    Low,
    /// Score in `[4, 7)`.
    Medium,
    /// Score of 7 or more.
    High,
    /// Only ever supplied by the server.
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl ImpactLabel {
    /// Three-tier derivation used whenever the server omits the label.
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            Self::High
        } else if score >= 4.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl WireEnum for ImpactLabel {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::VeryHigh];
    const FIELD: &'static str = "impact_label";

    fn as_str(self) -> &'static str {
        self.label()
    }

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().replace(['_', '-'], " ");
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.label().eq_ignore_ascii_case(&normalized))
    }
}

/// Moderation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    /// Waiting for an admin.
    Draft,
    /// Approved and visible to every audience.
    Confirmed,
}

impl WireEnum for TrendStatus {
    const ALL: &'static [Self] = &[Self::Draft, Self::Confirmed];
    const FIELD: &'static str = "status";

    fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Confirmed => "Confirmed",
        }
    }
}

/// Audience-specific descriptions, only sent to admins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptions {
    /// Text written for teaching staff.
    #[serde(default)]
    pub internal_teacher: Option<String>,
    /// Text written for business partners.
    #[serde(default)]
    pub internal_business: Option<String>,
    /// Text for external users. The detail endpoint names it `external_user`.
    #[serde(default, alias = "external_user")]
    pub external: Option<String>,
}

/// One row of a figures list in [`Statistics::Figures`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatFigure {
    /// The figure itself, already rendered as text.
    pub figure: String,
    /// Who published the figure.
    #[serde(default)]
    pub source: Option<String>,
    /// Publication year.
    #[serde(default)]
    pub year: Option<String>,
}

/// Supporting numbers attached to a trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Statistics {
    /// Labelled values, rendered as key/value boxes.
    Entries(serde_json::Map<String, Value>),
    /// A list of figures with their provenance.
    Figures(Vec<StatFigure>),
    /// Free text.
    Text(String),
}

impl Statistics {
    /// Resolves a raw wire value. Malformed JSON strings resolve to `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if !looks_like_json(trimmed) {
                    return Some(Self::Text(trimmed.to_string()));
                }
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(Value::String(inner)) => Some(Self::Text(inner)),
                    Ok(parsed) => Self::from_value(parsed),
                    Err(err) => {
                        tracing::warn!(error = %err, "dropping malformed statistics payload");
                        None
                    },
                }
            },
            Value::Object(map) if map.is_empty() => None,
            Value::Object(map) => Some(Self::Entries(map)),
            Value::Array(items) => {
                let figures: Vec<StatFigure> = items.into_iter().filter_map(figure_from).collect();
                if figures.is_empty() {
                    None
                } else {
                    Some(Self::Figures(figures))
                }
            },
            other => Some(Self::Text(other.to_string())),
        }
    }
}

fn figure_from(value: Value) -> Option<StatFigure> {
    match value {
        Value::Object(map) => {
            let figure = map
                .get("figure")
                .or_else(|| map.get("value"))
                .and_then(value_text)
                .unwrap_or_else(|| Value::Object(map.clone()).to_string());
            Some(StatFigure {
                figure,
                source: map.get("source").and_then(value_text),
                year: map.get("year").and_then(value_text),
            })
        },
        other => value_text(&other).map(|figure| StatFigure {
            figure,
            source: None,
            year: None,
        }),
    }
}

/// A citation backing a trend description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// Structured reference.
    Reference {
        /// Publishing organization.
        organization: String,
        /// Link to the publication.
        #[serde(default)]
        url: Option<String>,
        /// Publication year.
        #[serde(default)]
        year: Option<String>,
        /// Free-form reliability note.
        #[serde(default)]
        reliability: Option<String>,
    },
    /// A bare string, possibly a URL.
    Plain(String),
}

/// Placeholder used when a structured source names no organization.
pub const UNKNOWN_ORGANIZATION: &str = "Unknown Organization";

impl Source {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| Self::Plain(text.to_string()))
            },
            Value::Object(map) => Some(Self::Reference {
                organization: map
                    .get("organization")
                    .and_then(value_text)
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_ORGANIZATION.to_string()),
                url: map.get("url").and_then(value_text),
                year: map.get("year").and_then(value_text),
                reliability: map.get("reliability").and_then(value_text),
            }),
            _ => None,
        }
    }

    /// Link target, if this source has one.
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Reference {
                url, ..
            } => url.as_deref().filter(|url| !url.is_empty()),
            Self::Plain(text) if text.starts_with("http") => Some(text.as_str()),
            Self::Plain(_) => None,
        }
    }

    /// Short inline citation: `Organization, Year` or the bare text.
    pub fn citation(&self) -> String {
        match self {
            Self::Reference {
                organization,
                year: Some(year),
                ..
            } => format!("{organization}, {year}"),
            Self::Reference {
                organization, ..
            } => organization.clone(),
            Self::Plain(text) => text.clone(),
        }
    }
}

/// A trend record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Identifier.
    pub id: TrendId,
    /// Title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Category name.
    #[serde(default)]
    pub category: Option<String>,
    /// Subcategory names. Usually one, occasionally several.
    #[serde(default, deserialize_with = "string_or_list")]
    pub sub_category: Vec<String>,
    /// Owning department.
    #[serde(default)]
    pub department_name: Option<String>,
    /// Time horizon.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub time_horizon: Option<TimeHorizon>,
    /// Geographic scope.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub scope: Option<Scope>,
    /// Numeric impact, nominally 0 to 10.
    #[serde(default)]
    pub impact_score: Option<f64>,
    /// Server-supplied tier. Use [`Trend::impact`] for display.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub impact_label: Option<ImpactLabel>,
    /// Moderation status.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<TrendStatus>,
    /// All audience descriptions (admin payloads).
    #[serde(default)]
    pub descriptions: Option<Descriptions>,
    /// The caller's audience description (non-admin payloads).
    #[serde(default)]
    pub description: Option<String>,
    /// Example of the trend on the work floor.
    #[serde(default, rename = "werkvloer_voorbeeld", alias = "workplace_example")]
    pub workplace_example: Option<String>,
    /// Consequences for daily work.
    #[serde(default, rename = "gevolgen_werk", alias = "work_consequences")]
    pub work_consequences: Option<String>,
    /// Skills affected by the trend.
    #[serde(default, rename = "gevolgen_skills", alias = "skills", deserialize_with = "string_or_list")]
    pub skills: Vec<String>,
    /// What the trend means for the region.
    #[serde(default, rename = "regionale_vertaling", alias = "regional_translation")]
    pub regional_translation: Option<String>,
    /// Lifelong-learning opportunities.
    #[serde(default, rename = "llo_kansen", alias = "opportunities", deserialize_with = "string_or_list")]
    pub opportunities: Vec<String>,
    /// Supporting statistics.
    #[serde(default, rename = "cijfers", alias = "statistics", deserialize_with = "ingest_statistics")]
    pub statistics: Option<Statistics>,
    /// Citations.
    #[serde(default, rename = "bronnen", alias = "sources", deserialize_with = "ingest_sources")]
    pub sources: Vec<Source>,
}

impl Trend {
    /// Server label when present, otherwise derived from the score.
    pub fn impact(&self) -> ImpactLabel {
        self.impact_label
            .unwrap_or_else(|| ImpactLabel::from_score(self.impact_score.unwrap_or(0.0)))
    }

    /// Only drafts can be approved or disapproved.
    pub fn is_draft(&self) -> bool {
        self.status == Some(TrendStatus::Draft)
    }

    /// Category with blank values treated as absent.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }

    /// First non-blank subcategory.
    pub fn primary_sub_category(&self) -> Option<&str> {
        self.sub_category.iter().map(|name| name.trim()).find(|name| !name.is_empty())
    }

    /// Description shown to non-admin viewers.
    pub fn public_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or_else(|| self.descriptions.as_ref().and_then(|d| d.external.as_deref()))
            .filter(|text| !text.trim().is_empty())
    }
}

/// Department catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Identifier.
    #[serde(default)]
    pub id: i64,
    /// Display name, also the filter value.
    pub name: String,
}

/// Category catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier.
    #[serde(default)]
    pub id: i64,
    /// Display name, also the filter value.
    pub category_name: String,
    /// Parent department name.
    #[serde(default)]
    pub department: Option<String>,
}

/// Subcategory catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Identifier.
    #[serde(default)]
    pub id: i64,
    /// Display name, also the filter value.
    pub sub_category_name: String,
    /// Parent category name.
    #[serde(default)]
    pub category_name: Option<String>,
}

/// Counts per impact tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    /// High tier.
    #[serde(default)]
    pub high: u64,
    /// Medium tier.
    #[serde(default)]
    pub medium: u64,
    /// Low tier.
    #[serde(default)]
    pub low: u64,
    /// Very high tier, when the server reports it separately.
    #[serde(default)]
    pub very_high: u64,
}

/// Entry of the highest-impact ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTrend {
    /// Identifier.
    pub id: TrendId,
    /// Title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Impact score.
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact_score: f64,
    /// Category name.
    #[serde(default)]
    pub category: Option<String>,
}

/// Aggregate summary computed by the server for the current filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendStats {
    /// Number of matching trends.
    #[serde(default)]
    pub total_trends: u64,
    /// Counts per category.
    #[serde(default)]
    pub by_category: BTreeMap<String, u64>,
    /// Counts per department.
    #[serde(default)]
    pub by_department: BTreeMap<String, u64>,
    /// Counts per impact tier.
    #[serde(default)]
    pub by_impact: ImpactBreakdown,
    /// Highest impact trends, best first.
    #[serde(default)]
    pub highest_impact: Vec<RankedTrend>,
}

fn looks_like_json(text: &str) -> bool {
    text.starts_with('{') || text.starts_with('[') || text.starts_with('"')
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        },
        other => Some(other.to_string()),
    }
}

/// Reads an explicit `null` as the type's default, the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: WireEnum,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()).and_then(|value| {
        let parsed = T::parse(&value);
        if parsed.is_none() {
            tracing::warn!(field = T::FIELD, value = %value, "ignoring unknown enum value");
        }
        parsed
    }))
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().filter_map(value_text).collect(),
        other => value_text(&other).into_iter().collect(),
    };
    Ok(items)
}

fn ingest_statistics<'de, D>(deserializer: D) -> Result<Option<Statistics>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Statistics::from_value(Value::deserialize(deserializer)?))
}

fn ingest_sources<'de, D>(deserializer: D) -> Result<Vec<Source>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(sources_from(Value::deserialize(deserializer)?))
}

/// Resolves a raw `bronnen` value. Malformed JSON resolves to an empty list.
pub fn sources_from(value: Value) -> Vec<Source> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().filter_map(Source::from_value).collect(),
        Value::String(raw) if looks_like_json(raw.trim()) => {
            match serde_json::from_str::<Value>(raw.trim()) {
                Ok(Value::String(inner)) => Source::from_value(Value::String(inner)).into_iter().collect(),
                Ok(parsed) => sources_from(parsed),
                Err(err) => {
                    tracing::warn!(error = %err, "dropping malformed sources payload");
                    Vec::new()
                },
            }
        },
        other => Source::from_value(other).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn trend(value: Value) -> Trend {
        serde_json::from_value(value).expect("trend payload")
    }

    #[test]
    fn impact_tiers_follow_score_thresholds() {
        assert_eq!(ImpactLabel::from_score(0.0), ImpactLabel::Low);
        assert_eq!(ImpactLabel::from_score(3.99), ImpactLabel::Low);
        assert_eq!(ImpactLabel::from_score(4.0), ImpactLabel::Medium);
        assert_eq!(ImpactLabel::from_score(6.9), ImpactLabel::Medium);
        assert_eq!(ImpactLabel::from_score(7.0), ImpactLabel::High);
        assert_eq!(ImpactLabel::from_score(10.0), ImpactLabel::High);
    }

    #[test]
    fn server_label_wins_over_derived_one() {
        let labelled = trend(json!({"id": 1, "impact_score": 2, "impact_label": "Very High"}));
        assert_eq!(labelled.impact(), ImpactLabel::VeryHigh);

        let derived = trend(json!({"id": 2, "impact_score": 8.5}));
        assert_eq!(derived.impact(), ImpactLabel::High);

        let missing = trend(json!({"id": 3}));
        assert_eq!(missing.impact(), ImpactLabel::Low);
    }

    #[test]
    fn sub_category_accepts_string_list_and_null() {
        assert_eq!(trend(json!({"id": 1, "sub_category": "AI"})).sub_category, vec!["AI"]);
        assert_eq!(
            trend(json!({"id": 1, "sub_category": ["AI", "Robotics"]})).sub_category,
            vec!["AI", "Robotics"]
        );
        assert!(trend(json!({"id": 1, "sub_category": null})).sub_category.is_empty());
    }

    #[test]
    fn unknown_enum_values_are_dropped() {
        let parsed = trend(json!({
            "id": 7,
            "time_horizon": "someday",
            "scope": "Regional",
            "status": "archived"
        }));
        assert_eq!(parsed.time_horizon, None);
        assert_eq!(parsed.scope, Some(Scope::Regional));
        assert_eq!(parsed.status, None);
    }

    #[test]
    fn time_horizon_accepts_term_suffix() {
        assert_eq!(TimeHorizon::parse("long_term"), Some(TimeHorizon::Long));
        assert_eq!(TimeHorizon::parse("Short term"), Some(TimeHorizon::Short));
        assert_eq!(TimeHorizon::parse("medium"), Some(TimeHorizon::Medium));
    }

    #[test]
    fn dutch_field_names_map_onto_model() {
        let parsed = trend(json!({
            "id": 4,
            "werkvloer_voorbeeld": "Robots stack shelves",
            "gevolgen_werk": "Fewer night shifts",
            "gevolgen_skills": "Maintenance",
            "llo_kansen": ["Robotics course"],
            "regionale_vertaling": "Warehouses near the port"
        }));
        assert_eq!(parsed.workplace_example.as_deref(), Some("Robots stack shelves"));
        assert_eq!(parsed.work_consequences.as_deref(), Some("Fewer night shifts"));
        assert_eq!(parsed.skills, vec!["Maintenance"]);
        assert_eq!(parsed.opportunities, vec!["Robotics course"]);
        assert_eq!(parsed.regional_translation.as_deref(), Some("Warehouses near the port"));
    }

    #[test]
    fn external_user_alias_fills_external_description() {
        let parsed = trend(json!({
            "id": 5,
            "descriptions": {"internal_teacher": "t", "external_user": "public text"}
        }));
        assert_eq!(parsed.public_description(), Some("public text"));

        let single = trend(json!({"id": 6, "description": "only this"}));
        assert_eq!(single.public_description(), Some("only this"));
    }

    #[test]
    fn statistics_resolve_once_at_ingestion() {
        let encoded = trend(json!({"id": 1, "cijfers": "{\"growth_rate\": \"12%\"}"}));
        match encoded.statistics {
            Some(Statistics::Entries(map)) => assert_eq!(map["growth_rate"], json!("12%")),
            other => panic!("expected entries, got {other:?}"),
        }

        let figures = trend(json!({
            "id": 2,
            "cijfers": [{"figure": "40%", "source": "CBS", "year": 2023}, "plain"]
        }));
        assert_eq!(
            figures.statistics,
            Some(Statistics::Figures(vec![
                StatFigure {
                    figure: "40%".into(),
                    source: Some("CBS".into()),
                    year: Some("2023".into()),
                },
                StatFigure {
                    figure: "plain".into(),
                    source: None,
                    year: None,
                },
            ]))
        );

        let prose = trend(json!({"id": 3, "cijfers": "About half of firms"}));
        assert_eq!(prose.statistics, Some(Statistics::Text("About half of firms".into())));
    }

    #[test]
    fn malformed_embedded_json_falls_back_to_empty() {
        let parsed = trend(json!({
            "id": 9,
            "cijfers": "{not json",
            "bronnen": "[{\"organization\": "
        }));
        assert_eq!(parsed.statistics, None);
        assert!(parsed.sources.is_empty());
    }

    #[test]
    fn sources_accept_objects_strings_and_encoded_lists() {
        let parsed = trend(json!({
            "id": 10,
            "bronnen": "[{\"organization\": \"CBS\", \"year\": 2024, \"url\": \"https://cbs.nl\"}, {\"url\": \"x\"}, \"https://example.org/report\", \"Internal memo\"]"
        }));
        assert_eq!(parsed.sources.len(), 4);
        assert_eq!(parsed.sources[0].citation(), "CBS, 2024");
        assert_eq!(parsed.sources[0].link(), Some("https://cbs.nl"));
        assert_eq!(parsed.sources[1].citation(), UNKNOWN_ORGANIZATION);
        assert_eq!(parsed.sources[2].link(), Some("https://example.org/report"));
        assert_eq!(parsed.sources[3].link(), None);
    }

    #[test]
    fn stats_payload_tolerates_missing_sections() {
        let stats: TrendStats = serde_json::from_value(json!({
            "total_trends": 3,
            "by_impact": {"high": 1, "medium": 1, "low": 1}
        }))
        .expect("stats payload");
        assert_eq!(stats.total_trends, 3);
        assert_eq!(stats.by_impact.very_high, 0);
        assert!(stats.highest_impact.is_empty());
    }

    #[test]
    fn null_title_reads_as_empty() {
        let parsed = trend(json!({"id": 2, "title": null}));
        assert_eq!(parsed.id, 2);
        assert_eq!(parsed.title, "");
    }

    #[test]
    fn ranking_tolerates_null_title_and_score() {
        let stats: TrendStats = serde_json::from_value(json!({
            "total_trends": 2,
            "highest_impact": [
                {"id": 1, "title": null, "impact_score": null, "category": null},
                {"id": 2, "title": "Hybrid work", "impact_score": 8.5}
            ]
        }))
        .expect("stats payload");
        assert_eq!(stats.highest_impact.len(), 2);
        assert_eq!(stats.highest_impact[0].title, "");
        assert_eq!(stats.highest_impact[0].impact_score, 0.0);
        assert_eq!(stats.highest_impact[1].impact_score, 8.5);
    }
}
