//! Pagination state and the query parameters sent to the trend endpoints.
//!
//! Both builders are pure functions of their inputs. Every selected value is
//! emitted as its own repeated parameter, so servers see OR within a field
//! and AND across fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    filters::{FilterField, FilterState, ResetPage},
    model::Trend,
};

/// Related-trend lookups fetch one extra row to make room for the trend
/// itself.
pub const RELATED_FETCH_LIMIT: u32 = 4;

/// Allowed page sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum PageSize {
    /// 10 rows.
    #[default]
    Ten,
    /// 25 rows.
    TwentyFive,
    /// 50 rows.
    Fifty,
    /// 100 rows.
    Hundred,
}

impl PageSize {
    /// Every size, smallest first.
    pub const ALL: [PageSize; 4] = [PageSize::Ten, PageSize::TwentyFive, PageSize::Fifty, PageSize::Hundred];

    /// Rows per page.
    pub const fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl TryFrom<u32> for PageSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| format!("unsupported page size {value}, expected 10, 25, 50 or 100"))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// One slot of the page navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// A clickable page number.
    Page(u32),
    /// Collapsed run of pages, tagged with its side for stable keys.
    Ellipsis(&'static str),
}

/// Current page, page size and the server-reported total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page: u32,
    page_size: PageSize,
    total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Pagination {
    /// First page, nothing loaded yet.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page: 1,
            page_size,
            total: 0,
        }
    }

    /// Explicit page requested before the total is known, e.g. from a
    /// command line.
    pub fn starting_at(page: u32, page_size: PageSize) -> Self {
        Self {
            page: page.max(1),
            ..Self::new(page_size)
        }
    }

    /// Current page, 1-based.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Total matching rows as reported by the server.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Records the total from a listing response.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Back to page 1 after a filter change.
    pub fn reset(&mut self, _: ResetPage) {
        self.page = 1;
    }

    /// Moves to `page`, clamped into range. Returns whether it moved.
    pub fn go_to(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.total_pages());
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// At least one page, even when empty.
    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.get());
        let pages = self.total.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// 1-based inclusive range of the rows on the current page.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let size = u64::from(self.page_size.get());
        let start = u64::from(self.page.saturating_sub(1)) * size + 1;
        let end = (u64::from(self.page) * size).min(self.total);
        (start <= end).then_some((start, end))
    }

    /// `"11-20 of 42 items"`, or nothing for an empty listing.
    pub fn summary(&self) -> Option<String> {
        self.item_range()
            .map(|(start, end)| format!("{start}-{end} of {} items", self.total))
    }

    /// Page numbers to render: first, last and a window around the current
    /// page, with ellipses for the gaps.
    pub fn slots(&self) -> Vec<PageSlot> {
        let total = self.total_pages();
        let current = self.page.clamp(1, total);
        if total <= 7 {
            return (1..=total).map(PageSlot::Page).collect();
        }

        let mut slots = vec![PageSlot::Page(1)];

        let mut start = current.saturating_sub(2).max(2);
        let mut end = (current + 2).min(total - 1);
        if current <= 3 {
            start = 2;
            end = 5;
        } else if current + 2 >= total {
            start = total.saturating_sub(4).max(2);
            end = total - 1;
        }

        if start > 2 {
            slots.push(PageSlot::Ellipsis("left"));
        }
        slots.extend((start..=end).map(PageSlot::Page));
        if end < total - 1 {
            slots.push(PageSlot::Ellipsis("right"));
        }
        slots.push(PageSlot::Page(total));
        slots
    }
}

/// Ordered query parameters, repeated keys allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    /// Appends one `key=value` pair.
    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.push((key, value.into()));
    }

    /// All pairs in emission order.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    /// Every value sent under `key`.
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Percent-encoded `a=1&b=2`, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn extend_filters(&mut self, filters: &FilterState) {
        for field in FilterField::ALL {
            for value in filters.selected(field) {
                self.push(field.param(), value.clone());
            }
        }
    }
}

/// Parameters for `GET /api/trends`.
pub fn listing_query(filters: &FilterState, pagination: &Pagination) -> QueryParams {
    let mut params = QueryParams::default();
    params.extend_filters(filters);
    params.push("page", pagination.page().to_string());
    params.push("limit", pagination.page_size().get().to_string());
    params
}

/// Parameters for `GET /api/trends/stats`.
pub fn stats_query(filters: &FilterState) -> QueryParams {
    let mut params = QueryParams::default();
    params.extend_filters(filters);
    params
}

/// Listing parameters for trends related to `trend`: same category, and the
/// same first subcategory when it has one.
pub fn related_query(trend: &Trend) -> QueryParams {
    let mut params = QueryParams::default();
    if let Some(category) = trend.category_name() {
        params.push(FilterField::Category.param(), category);
    }
    if let Some(sub) = trend.primary_sub_category() {
        params.push(FilterField::SubCategory.param(), sub);
    }
    params.push("page", "1");
    params.push("limit", RELATED_FETCH_LIMIT.to_string());
    params
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::filters::FilterPatch;

    fn pagination(page: u32, size: PageSize, total: u64) -> Pagination {
        let mut p = Pagination::new(size);
        p.set_total(total);
        assert!(p.go_to(page) || page == 1);
        p
    }

    #[test]
    fn listing_query_repeats_multi_values_and_skips_empty_fields() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(
            FilterPatch::new()
                .set(FilterField::Department, ["IT", "HR"])
                .set(FilterField::Scope, Vec::<String>::new())
                .set(FilterField::Impact, ["High"]),
        );
        let params = listing_query(&filters, &pagination(2, PageSize::TwentyFive, 60));

        assert_eq!(params.values("department_name"), vec!["HR", "IT"]);
        assert_eq!(params.values("impact_label"), vec!["High"]);
        assert!(params.values("scope").is_empty());
        assert_eq!(params.values("page"), vec!["2"]);
        assert_eq!(params.values("limit"), vec!["25"]);
    }

    #[test]
    fn stats_query_has_no_pagination() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Category, ["Cloud"]));
        let params = stats_query(&filters);
        assert_eq!(params.pairs(), &[("category", "Cloud".to_string())]);
    }

    #[test]
    fn builders_are_idempotent() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::SubCategory, ["AI", "Data"]));
        let p = Pagination::default();
        assert_eq!(listing_query(&filters, &p), listing_query(&filters, &p));
        assert_eq!(stats_query(&filters), stats_query(&filters));
    }

    #[test]
    fn query_string_is_percent_encoded() {
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Impact, ["Very High"]));
        assert_eq!(stats_query(&filters).to_query_string(), "impact_label=Very%20High");
    }

    #[test]
    fn related_query_uses_category_and_first_subcategory() {
        let trend: Trend = serde_json::from_value(json!({
            "id": 3,
            "category": "Technology",
            "sub_category": ["AI", "Robotics"]
        }))
        .expect("trend");
        let params = related_query(&trend);
        assert_eq!(params.values("category"), vec!["Technology"]);
        assert_eq!(params.values("sub_category"), vec!["AI"]);
        assert_eq!(params.values("limit"), vec!["4"]);
    }

    #[test]
    fn page_size_change_and_reset_return_to_first_page() {
        let mut p = pagination(3, PageSize::Ten, 100);
        assert_eq!(p.page(), 3);
        p.set_page_size(PageSize::Fifty);
        assert_eq!(p.page(), 1);

        assert!(p.go_to(2));
        p.reset(ResetPage);
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn go_to_clamps_into_range() {
        let mut p = pagination(1, PageSize::Ten, 35);
        assert!(p.go_to(99));
        assert_eq!(p.page(), 4);
        assert!(!p.go_to(4));
        assert!(p.go_to(0));
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn item_range_and_summary() {
        let p = pagination(2, PageSize::Ten, 15);
        assert_eq!(p.item_range(), Some((11, 15)));
        assert_eq!(p.summary().as_deref(), Some("11-15 of 15 items"));
        assert_eq!(Pagination::default().summary(), None);
        assert_eq!(Pagination::default().total_pages(), 1);
    }

    #[test]
    fn slots_collapse_long_ranges() {
        assert_eq!(pagination(1, PageSize::Ten, 50).slots().len(), 5);

        let middle = pagination(10, PageSize::Ten, 200).slots();
        assert_eq!(
            middle,
            vec![
                PageSlot::Page(1),
                PageSlot::Ellipsis("left"),
                PageSlot::Page(8),
                PageSlot::Page(9),
                PageSlot::Page(10),
                PageSlot::Page(11),
                PageSlot::Page(12),
                PageSlot::Ellipsis("right"),
                PageSlot::Page(20),
            ]
        );

        let tail = pagination(20, PageSize::Ten, 200).slots();
        assert_eq!(tail.first(), Some(&PageSlot::Page(1)));
        assert_eq!(tail[1], PageSlot::Ellipsis("left"));
        assert_eq!(&tail[2..], &[16, 17, 18, 19, 20].map(PageSlot::Page));
    }

    #[test]
    fn page_size_rejects_unknown_values() {
        assert_eq!(PageSize::try_from(25_u32), Ok(PageSize::TwentyFive));
        assert!(PageSize::try_from(30_u32).is_err());
    }
}
