//! Presentation helpers for the server-computed statistics summary.

use std::collections::BTreeMap;

use crate::model::{ImpactLabel, TrendStats};

/// Bars shown per breakdown chart.
pub const TOP_BARS: usize = 5;

/// One bar of a breakdown chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category or department.
    pub label: String,
    /// Trends counted under the label.
    pub count: u64,
    /// Width relative to the total, `0.0..=100.0`.
    pub percent: f64,
}

/// Share of `count` in `total`, in percent. Zero when `total` is zero.
pub fn percent_of_total(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Largest counts first, ties by label, at most `limit` bars.
pub fn ranked_bars(counts: &BTreeMap<String, u64>, total: u64, limit: usize) -> Vec<Bar> {
    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .take(limit)
        .map(|(label, count)| Bar {
            label: label.clone(),
            count: *count,
            percent: percent_of_total(*count, total),
        })
        .collect()
}

/// Impact tiers with their counts, highest tier first. Very High is only
/// listed when the server reports it.
pub fn impact_distribution(stats: &TrendStats) -> Vec<(ImpactLabel, u64)> {
    let by = &stats.by_impact;
    let mut tiers = Vec::with_capacity(4);
    if by.very_high > 0 {
        tiers.push((ImpactLabel::VeryHigh, by.very_high));
    }
    tiers.extend([
        (ImpactLabel::High, by.high),
        (ImpactLabel::Medium, by.medium),
        (ImpactLabel::Low, by.low),
    ]);
    tiers
}

/// Category bars for `stats`.
pub fn category_bars(stats: &TrendStats) -> Vec<Bar> {
    ranked_bars(&stats.by_category, stats.total_trends, TOP_BARS)
}

/// Department bars for `stats`.
pub fn department_bars(stats: &TrendStats) -> Vec<Bar> {
    ranked_bars(&stats.by_department, stats.total_trends, TOP_BARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImpactBreakdown;

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn bars_sorted_desc_and_capped() {
        let map = counts(&[("a", 1), ("b", 5), ("c", 3), ("d", 3), ("e", 2), ("f", 4)]);
        let bars = ranked_bars(&map, 18, 5);
        let labels: Vec<_> = bars.iter().map(|bar| bar.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "f", "c", "d", "e"]);
        assert!((bars[0].percent - 500.0 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_yields_zero_width() {
        assert_eq!(percent_of_total(3, 0), 0.0);
        assert_eq!(percent_of_total(1, 4), 25.0);
    }

    #[test]
    fn distribution_lists_very_high_only_when_present() {
        let mut stats = TrendStats {
            by_impact: ImpactBreakdown {
                high: 2,
                medium: 1,
                low: 0,
                very_high: 0,
            },
            ..TrendStats::default()
        };
        assert_eq!(impact_distribution(&stats).len(), 3);
        stats.by_impact.very_high = 1;
        assert_eq!(impact_distribution(&stats)[0], (ImpactLabel::VeryHigh, 1));
    }
}
