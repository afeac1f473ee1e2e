//! Headless dashboard controller.
//!
//! [`DashboardState`] owns every piece of view state and never performs I/O.
//! Each operation returns the [`Effect`]s the shell has to run; results come
//! back through the `*_loaded` / `*_failed` methods together with the ticket
//! the effect was issued with. Responses carrying an outdated ticket are
//! discarded.
//!
//! The selection is cleared whenever the visible rows change because of a
//! filter, page or page-size change, so ids never linger for rows that are no
//! longer on screen.

use crate::{
    api::{ApiError, TrendListResponse},
    catalog::OptionCatalog,
    detail::{DetailPanel, DetailTab},
    filters::{FilterField, FilterPatch, FilterState, ViewMode},
    moderation::{Moderation, ModerationAction, ModerationTarget},
    model::{Trend, TrendId, TrendStats},
    notify::Notice,
    query::{listing_query, related_query, stats_query, PageSize, Pagination, QueryParams},
    selection::{HeaderCheckbox, SelectionSet},
    users::Role,
};

/// Monotonic request id used to drop stale responses.
pub type Ticket = u64;

/// Work the shell must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch departments, categories and subcategories, then report through
    /// [`DashboardState::catalog_loaded`].
    LoadCatalog,
    /// Fetch one listing page.
    FetchTrends {
        /// Pass back to [`DashboardState::trends_loaded`].
        ticket: Ticket,
        /// Listing parameters.
        params: QueryParams,
    },
    /// Fetch the statistics summary.
    FetchStats {
        /// Pass back to [`DashboardState::stats_loaded`].
        ticket: Ticket,
        /// Filter parameters.
        params: QueryParams,
    },
    /// Fetch candidates for the related-trends list.
    FetchRelated {
        /// Pass back to [`DashboardState::related_loaded`].
        ticket: Ticket,
        /// Trend on display when the lookup was issued.
        trend_id: TrendId,
        /// Listing parameters.
        params: QueryParams,
    },
    /// Show a toast.
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tickets {
    trends: Ticket,
    stats: Ticket,
    related: Ticket,
}

/// Complete state of the dashboard page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    role: Role,
    filters: FilterState,
    pagination: Pagination,
    view_mode: ViewMode,
    selection: SelectionSet,
    detail: DetailPanel,
    catalog: OptionCatalog,
    catalog_ready: bool,
    trends: Vec<Trend>,
    stats: Option<TrendStats>,
    loading_trends: bool,
    loading_stats: bool,
    tickets: Tickets,
}

impl DashboardState {
    /// Fresh state for a viewer with `role`.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    /// Viewer role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Current filters.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Current pagination.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// List or grouped.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Ticked rows.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Detail panel.
    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    /// Filter options.
    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    /// Whether the catalog request has completed.
    pub fn catalog_ready(&self) -> bool {
        self.catalog_ready
    }

    /// Rows of the current page.
    pub fn trends(&self) -> &[Trend] {
        &self.trends
    }

    /// Latest statistics summary.
    pub fn stats(&self) -> Option<&TrendStats> {
        self.stats.as_ref()
    }

    /// Whether a listing request is in flight.
    pub fn loading_trends(&self) -> bool {
        self.loading_trends
    }

    /// Whether a statistics request is in flight.
    pub fn loading_stats(&self) -> bool {
        self.loading_stats
    }

    /// First effect of a mounted page. Nothing else is fetched until the
    /// catalog is in.
    pub fn mount(&mut self) -> Vec<Effect> {
        self.catalog_ready = false;
        vec![Effect::LoadCatalog]
    }

    /// Stores the catalog and issues the first listing and stats fetch.
    pub fn catalog_loaded(&mut self, catalog: OptionCatalog) -> Vec<Effect> {
        self.catalog = catalog;
        self.catalog_ready = true;
        self.refresh()
    }

    /// Reports the failure and loads trends with whatever options exist.
    pub fn catalog_failed(&mut self, err: &ApiError) -> Vec<Effect> {
        tracing::warn!(error = %err, "catalog request failed");
        self.catalog_ready = true;
        let mut effects = vec![Effect::Notify(Notice::error(format!(
            "Failed to load filter options: {}",
            err.user_message()
        )))];
        effects.extend(self.refresh());
        effects
    }

    /// Replaces the fields named in `patch`.
    pub fn apply_filters(&mut self, patch: FilterPatch) -> Vec<Effect> {
        if patch.is_empty() {
            return Vec::new();
        }
        let reset = self.filters.apply_partial(patch);
        self.pagination.reset(reset);
        self.selection.clear();
        self.refresh()
    }

    /// Removes one active filter value.
    pub fn remove_filter_value(&mut self, field: FilterField, value: &str) -> Vec<Effect> {
        let reset = self.filters.remove_value(field, value);
        self.pagination.reset(reset);
        self.selection.clear();
        self.refresh()
    }

    /// Clears every filter.
    pub fn clear_filters(&mut self) -> Vec<Effect> {
        let reset = self.filters.clear_all();
        self.pagination.reset(reset);
        self.selection.clear();
        self.refresh()
    }

    /// Navigates to `page`.
    pub fn go_to_page(&mut self, page: u32) -> Vec<Effect> {
        if !self.pagination.go_to(page) {
            return Vec::new();
        }
        self.selection.clear();
        self.fetch_trends().into_iter().collect()
    }

    /// Changes the page size, back on page 1.
    pub fn set_page_size(&mut self, size: PageSize) -> Vec<Effect> {
        if size == self.pagination.page_size() {
            return Vec::new();
        }
        self.pagination.set_page_size(size);
        self.selection.clear();
        self.fetch_trends().into_iter().collect()
    }

    /// Switches between list and grouped rendering.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Ticks or unticks a row. Ignored for non-admins.
    pub fn toggle_row(&mut self, id: TrendId) {
        if self.role.is_admin() {
            self.selection.toggle(id);
        }
    }

    /// Header checkbox click over the rows on screen.
    pub fn toggle_visible(&mut self) {
        if self.role.is_admin() {
            let visible = self.visible_ids();
            self.selection.toggle_visible(&visible);
        }
    }

    /// Header checkbox state over the rows on screen.
    pub fn header_checkbox(&self) -> HeaderCheckbox {
        self.selection.header_state(&self.visible_ids())
    }

    fn visible_ids(&self) -> Vec<TrendId> {
        self.trends.iter().map(|trend| trend.id).collect()
    }

    /// Opens the panel on a row of the current page.
    pub fn open_detail(&mut self, id: TrendId) -> Vec<Effect> {
        match self.trends.iter().find(|trend| trend.id == id).cloned() {
            Some(trend) => self.show(trend),
            None => Vec::new(),
        }
    }

    /// Opens the panel on a trend fetched elsewhere.
    pub fn show(&mut self, trend: Trend) -> Vec<Effect> {
        let params = related_query(&trend);
        let trend_id = trend.id;
        self.detail.open(trend);
        self.tickets.related += 1;
        vec![Effect::FetchRelated {
            ticket: self.tickets.related,
            trend_id,
            params,
        }]
    }

    /// Swaps the panel to one of its related trends.
    pub fn select_related(&mut self, id: TrendId) -> Vec<Effect> {
        let next = self
            .detail
            .related()
            .and_then(|related| related.iter().find(|trend| trend.id == id))
            .cloned();
        match next {
            Some(trend) => self.show(trend),
            None => Vec::new(),
        }
    }

    /// Closes the panel.
    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    /// Changes the detail tab.
    pub fn select_tab(&mut self, tab: DetailTab) {
        self.detail.select_tab(tab, self.role);
    }

    /// Applies a listing response. When the new total leaves the current
    /// page past the end, moves to the last page and refetches it.
    pub fn trends_loaded(&mut self, ticket: Ticket, response: TrendListResponse) -> Vec<Effect> {
        if ticket != self.tickets.trends {
            tracing::debug!(ticket, latest = self.tickets.trends, "discarding stale listing");
            return Vec::new();
        }
        self.loading_trends = false;
        self.pagination.set_total(response.total());
        self.trends = response.trends;
        let last = self.pagination.total_pages();
        if self.pagination.page() <= last {
            return Vec::new();
        }
        tracing::debug!(page = self.pagination.page(), last, "page past the end, clamping");
        let _ = self.pagination.go_to(last);
        self.selection.clear();
        self.fetch_trends().into_iter().collect()
    }

    /// Reports a failed listing request.
    pub fn trends_failed(&mut self, ticket: Ticket, err: &ApiError) -> Vec<Effect> {
        if ticket != self.tickets.trends {
            return Vec::new();
        }
        self.loading_trends = false;
        tracing::warn!(error = %err, "listing request failed");
        vec![Effect::Notify(Notice::error(format!("Failed to load trends: {}", err.user_message())))]
    }

    /// Applies a statistics response. Returns whether it was current.
    pub fn stats_loaded(&mut self, ticket: Ticket, stats: TrendStats) -> bool {
        if ticket != self.tickets.stats {
            tracing::debug!(ticket, latest = self.tickets.stats, "discarding stale stats");
            return false;
        }
        self.loading_stats = false;
        self.stats = Some(stats);
        true
    }

    /// Reports a failed statistics request.
    pub fn stats_failed(&mut self, ticket: Ticket, err: &ApiError) -> Vec<Effect> {
        if ticket != self.tickets.stats {
            return Vec::new();
        }
        self.loading_stats = false;
        tracing::warn!(error = %err, "stats request failed");
        vec![Effect::Notify(Notice::error(format!(
            "Failed to load statistics: {}",
            err.user_message()
        )))]
    }

    /// Applies related candidates for `trend_id`. Returns whether they were
    /// current.
    pub fn related_loaded(&mut self, ticket: Ticket, trend_id: TrendId, candidates: Vec<Trend>) -> bool {
        if ticket != self.tickets.related {
            tracing::debug!(ticket, latest = self.tickets.related, "discarding stale related lookup");
            return false;
        }
        self.detail.set_related(trend_id, candidates)
    }

    /// A failed related lookup leaves an empty list behind.
    pub fn related_failed(&mut self, ticket: Ticket, trend_id: TrendId, err: &ApiError) {
        tracing::warn!(error = %err, trend_id, "related lookup failed");
        let _ = self.related_loaded(ticket, trend_id, Vec::new());
    }

    /// Request for the trend in the detail panel. Only admins can moderate,
    /// and only drafts.
    pub fn detail_moderation(&self, action: ModerationAction) -> Option<Moderation> {
        let trend = self.detail.trend()?;
        (self.role.is_admin() && trend.is_draft()).then(|| Moderation {
            action,
            target: ModerationTarget::Single(trend.id),
        })
    }

    /// Request for the ticked rows, if any.
    pub fn bulk_moderation(&self, action: ModerationAction) -> Option<Moderation> {
        (self.role.is_admin() && !self.selection.is_empty()).then(|| Moderation {
            action,
            target: ModerationTarget::Bulk(self.selection.ids()),
        })
    }

    /// Folds the outcome of a moderation request into the state.
    ///
    /// Success unticks the affected rows (all of them for bulk requests),
    /// closes the panel and refreshes listing and stats once each. Failure
    /// only reports; the panel stays open.
    pub fn moderation_finished(&mut self, moderation: &Moderation, outcome: Result<(), ApiError>) -> Vec<Effect> {
        match outcome {
            Ok(()) => {
                let ids = moderation.target.ids();
                match moderation.target {
                    ModerationTarget::Single(_) => {
                        self.selection.remove_all(&ids);
                        self.detail.close();
                    },
                    ModerationTarget::Bulk(_) => {
                        self.selection.clear();
                        if self.detail.trend_id().is_some_and(|open| ids.contains(&open)) {
                            self.detail.close();
                        }
                    },
                }
                tracing::info!(action = moderation.action.verb(), count = ids.len(), "moderation applied");
                let mut effects = vec![Effect::Notify(Notice::success(moderation.success_message()))];
                effects.extend(self.refresh());
                effects
            },
            Err(err) => {
                tracing::warn!(action = moderation.action.verb(), error = %err, "moderation failed");
                vec![Effect::Notify(Notice::error(moderation.failure_message(&err.user_message())))]
            },
        }
    }

    fn refresh(&mut self) -> Vec<Effect> {
        if !self.catalog_ready {
            return Vec::new();
        }
        let mut effects: Vec<Effect> = self.fetch_trends().into_iter().collect();
        self.tickets.stats += 1;
        self.loading_stats = true;
        effects.push(Effect::FetchStats {
            ticket: self.tickets.stats,
            params: stats_query(&self.filters),
        });
        effects
    }

    fn fetch_trends(&mut self) -> Option<Effect> {
        if !self.catalog_ready {
            return None;
        }
        self.tickets.trends += 1;
        self.loading_trends = true;
        Some(Effect::FetchTrends {
            ticket: self.tickets.trends,
            params: listing_query(&self.filters, &self.pagination),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::notify::NoticeKind;

    fn trend(id: TrendId, status: &str) -> Trend {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Trend {id}"),
            "category": "Technology",
            "sub_category": ["AI"],
            "status": status
        }))
        .expect("trend")
    }

    fn page(ids: std::ops::RangeInclusive<TrendId>, total: u64) -> TrendListResponse {
        TrendListResponse {
            trends: ids.map(|id| trend(id, "draft")).collect(),
            total: Some(total),
        }
    }

    fn ready(role: Role) -> DashboardState {
        let mut state = DashboardState::new(role);
        assert_eq!(state.mount(), vec![Effect::LoadCatalog]);
        let effects = state.catalog_loaded(OptionCatalog::default());
        let ticket = trends_ticket(&effects).expect("listing fetch");
        assert!(state.trends_loaded(ticket, page(1..=10, 40)).is_empty());
        assert_eq!(state.trends().len(), 10);
        state
    }

    fn trends_ticket(effects: &[Effect]) -> Option<Ticket> {
        effects.iter().find_map(|effect| match effect {
            Effect::FetchTrends {
                ticket, ..
            } => Some(*ticket),
            _ => None,
        })
    }

    fn count(effects: &[Effect], pred: impl Fn(&Effect) -> bool) -> usize {
        effects.iter().filter(|effect| pred(effect)).count()
    }

    fn is_trends(effect: &Effect) -> bool {
        matches!(effect, Effect::FetchTrends { .. })
    }

    fn is_stats(effect: &Effect) -> bool {
        matches!(effect, Effect::FetchStats { .. })
    }

    #[test]
    fn catalog_precedes_first_fetch() {
        let mut state = DashboardState::new(Role::Member);
        assert_eq!(state.mount(), vec![Effect::LoadCatalog]);
        // Filter changes before the catalog resolves only update state.
        assert!(state
            .apply_filters(FilterPatch::new().set(FilterField::Scope, ["local"]))
            .is_empty());

        let effects = state.catalog_loaded(OptionCatalog::default());
        assert_eq!(count(&effects, is_trends), 1);
        assert_eq!(count(&effects, is_stats), 1);
        match &effects[0] {
            Effect::FetchTrends {
                params, ..
            } => assert_eq!(params.values("scope"), vec!["local"]),
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn filter_change_resets_page_and_refetches_both() {
        let mut state = ready(Role::Admin);
        let _ = state.go_to_page(3);
        assert_eq!(state.pagination().page(), 3);

        let effects = state.apply_filters(FilterPatch::new().set(FilterField::Department, ["IT"]));
        assert_eq!(state.pagination().page(), 1);
        assert_eq!(count(&effects, is_trends), 1);
        assert_eq!(count(&effects, is_stats), 1);

        let _ = state.go_to_page(2);
        let _ = state.clear_filters();
        assert_eq!(state.pagination().page(), 1);
        assert!(!state.filters().has_active());
    }

    #[test]
    fn page_size_change_drops_selection_of_previous_page() {
        let mut state = ready(Role::Admin);
        state.toggle_visible();
        assert_eq!(state.selection().len(), 10);
        assert_eq!(state.header_checkbox(), HeaderCheckbox::Checked);

        let effects = state.set_page_size(PageSize::TwentyFive);
        assert!(state.selection().is_empty());
        assert_eq!(state.pagination().page(), 1);
        assert_eq!(count(&effects, is_trends), 1);
        assert_eq!(count(&effects, is_stats), 0);
    }

    #[test]
    fn page_change_drops_selection() {
        let mut state = ready(Role::Admin);
        state.toggle_row(3);
        let effects = state.go_to_page(2);
        assert!(state.selection().is_empty());
        assert_eq!(count(&effects, is_trends), 1);
        assert!(state.go_to_page(2).is_empty());
    }

    #[test]
    fn members_cannot_select_rows() {
        let mut state = ready(Role::Member);
        state.toggle_row(1);
        state.toggle_visible();
        assert!(state.selection().is_empty());
        assert!(state.bulk_moderation(ModerationAction::Approve).is_none());
    }

    #[test]
    fn stale_listing_is_discarded() {
        let mut state = ready(Role::Member);
        let first = trends_ticket(&state.go_to_page(2)).expect("ticket");
        let second = trends_ticket(&state.go_to_page(3)).expect("ticket");

        assert!(state.trends_loaded(second, page(21..=30, 40)).is_empty());
        assert!(state.trends_loaded(first, page(11..=20, 40)).is_empty());
        assert_eq!(state.trends()[0].id, 21);
        assert!(state.trends_failed(first, &ApiError::Network("late".into())).is_empty());
    }

    #[test]
    fn shrunken_total_clamps_page_and_refetches() {
        let mut state = ready(Role::Admin);
        let ticket = trends_ticket(&state.go_to_page(4)).expect("ticket");
        state.toggle_row(31);

        let effects = state.trends_loaded(ticket, page(1..=0, 30));
        assert_eq!(state.pagination().page(), 3);
        assert!(state.selection().is_empty());
        assert!(state.loading_trends());
        assert_eq!(count(&effects, is_trends), 1);
        match &effects[0] {
            Effect::FetchTrends {
                params, ..
            } => assert_eq!(params.values("page"), vec!["3"]),
            other => panic!("unexpected effect {other:?}"),
        }

        let refetch = trends_ticket(&effects).expect("ticket");
        assert!(state.trends_loaded(refetch, page(21..=30, 30)).is_empty());
        assert_eq!(state.pagination().page(), 3);
        assert_eq!(state.trends()[0].id, 21);
    }

    #[test]
    fn approve_success_refreshes_once_and_closes_panel() {
        let mut state = ready(Role::Admin);
        let _ = state.show(trend(42, "draft"));
        state.toggle_row(42);
        state.toggle_row(7);

        let moderation = state
            .detail_moderation(ModerationAction::Approve)
            .expect("draft is moderatable");
        assert_eq!(moderation.target, ModerationTarget::Single(42));

        let effects = state.moderation_finished(&moderation, Ok(()));
        assert_eq!(count(&effects, is_trends), 1);
        assert_eq!(count(&effects, is_stats), 1);
        assert!(!state.selection().contains(42));
        assert!(state.selection().contains(7));
        assert!(!state.detail().is_open());
        assert!(!state.detail().scroll_locked());
        assert!(effects.contains(&Effect::Notify(Notice::success("Trend approved successfully!"))));
    }

    #[test]
    fn failed_moderation_keeps_panel_open() {
        let mut state = ready(Role::Admin);
        let _ = state.open_detail(5);
        let moderation = state
            .detail_moderation(ModerationAction::Disapprove)
            .expect("draft");
        let effects = state.moderation_finished(
            &moderation,
            Err(ApiError::Server {
                status: 500,
                message: "db down".into(),
            }),
        );
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Notify(notice) => {
                assert_eq!(notice.kind, NoticeKind::Error);
                assert_eq!(notice.message, "Failed to disapprove trend: db down");
            },
            other => panic!("unexpected effect {other:?}"),
        }
        assert!(state.detail().is_open());
    }

    #[test]
    fn bulk_success_clears_selection() {
        let mut state = ready(Role::Admin);
        state.toggle_row(1);
        state.toggle_row(2);
        let moderation = state
            .bulk_moderation(ModerationAction::Approve)
            .expect("selection");
        let effects = state.moderation_finished(&moderation, Ok(()));
        assert!(state.selection().is_empty());
        assert!(effects.contains(&Effect::Notify(Notice::success("Successfully approved 2 trend(s)!"))));
        assert_eq!(count(&effects, is_stats), 1);
    }

    #[test]
    fn confirmed_trends_cannot_be_moderated() {
        let mut state = ready(Role::Admin);
        let _ = state.show(trend(99, "confirmed"));
        assert!(state.detail_moderation(ModerationAction::Approve).is_none());
    }

    #[test]
    fn related_selection_reloads_related_for_new_trend() {
        let mut state = ready(Role::Member);
        let effects = state.open_detail(1);
        let (ticket, trend_id) = match &effects[..] {
            [Effect::FetchRelated {
                ticket,
                trend_id,
                params,
            }] => {
                assert_eq!(params.values("category"), vec!["Technology"]);
                (*ticket, *trend_id)
            },
            other => panic!("unexpected effects {other:?}"),
        };
        assert!(state.related_loaded(ticket, trend_id, vec![trend(1, "confirmed"), trend(8, "confirmed")]));
        assert_eq!(state.detail().related().map(<[Trend]>::len), Some(1));

        let next = state.select_related(8);
        assert_eq!(state.detail().trend_id(), Some(8));
        assert!(state.detail().is_open());
        assert_eq!(count(&next, |e| matches!(e, Effect::FetchRelated { .. })), 1);
        // The earlier lookup no longer applies.
        assert!(!state.related_loaded(ticket, trend_id, Vec::new()));
    }
}
