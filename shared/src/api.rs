//! Remote API surface shared by the browser and CLI clients.
//!
//! Paths, response envelopes and the error taxonomy live here so both
//! transports agree on them. The bearer token is never looked up implicitly:
//! callers build a [`RequestContext`] per request and pass it in.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    model::{Category, Department, Subcategory, Trend, TrendId, TrendStats},
    query::QueryParams,
    users::{User, UserId},
};

/// Where to send a request and with which credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_url: String,
    token: Option<String>,
}

impl RequestContext {
    /// `base_url` is the server origin, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.filter(|token| !token.trim().is_empty()),
        }
    }

    /// Server origin without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL for `path` with `params` appended.
    pub fn url_with(&self, path: &str, params: &QueryParams) -> String {
        if params.is_empty() {
            return self.url(path);
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}{}", self.base_url, path, separator, params.to_query_string())
    }

    /// `Authorization` header value, when signed in.
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

/// Endpoint paths.
pub mod paths {
    use super::{TrendId, UserId};

    /// Active departments.
    pub const DEPARTMENTS: &str = "/api/departments?active_only=true";
    /// All categories.
    pub const CATEGORIES: &str = "/api/categories";
    /// All subcategories.
    pub const SUBCATEGORIES: &str = "/api/subcategories";
    /// Paginated listing.
    pub const TRENDS: &str = "/api/trends";
    /// Aggregate statistics.
    pub const TREND_STATS: &str = "/api/trends/stats";
    /// Bulk approve, `PUT`.
    pub const BULK_APPROVE: &str = "/api/trends/bulk-approve";
    /// Bulk disapprove, `DELETE`.
    pub const BULK_DISAPPROVE: &str = "/api/trends/bulk-disapprove";
    /// User listing and creation.
    pub const USERS: &str = "/api/users";

    /// One trend.
    pub fn trend(id: TrendId) -> String {
        format!("{TRENDS}/{id}")
    }

    /// Approve one trend, `PUT`.
    pub fn approve(id: TrendId) -> String {
        format!("{TRENDS}/{id}/approve")
    }

    /// Disapprove one trend, `DELETE`.
    pub fn disapprove(id: TrendId) -> String {
        format!("{TRENDS}/{id}/disapprove")
    }

    /// One user.
    pub fn user(id: &UserId) -> String {
        format!("{USERS}/{}", urlencoding::encode(id))
    }
}

/// `GET /api/departments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentsResponse {
    /// Entries.
    #[serde(default)]
    pub departments: Vec<Department>,
}

/// `GET /api/categories`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesResponse {
    /// Entries.
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// `GET /api/subcategories`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubcategoriesResponse {
    /// Entries.
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// `GET /api/trends`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendListResponse {
    /// Rows of the requested page.
    #[serde(default)]
    pub trends: Vec<Trend>,
    /// Matching rows across all pages.
    #[serde(default)]
    pub total: Option<u64>,
}

impl TrendListResponse {
    /// Server total, or the row count when the server left it out.
    pub fn total(&self) -> u64 {
        self.total.unwrap_or(self.trends.len() as u64)
    }
}

/// `GET /api/trends/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Summary.
    #[serde(default)]
    pub stats: TrendStats,
}

/// `GET /api/trends/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendResponse {
    /// The trend.
    pub trend: Trend,
}

/// `GET /api/users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    /// Accounts.
    #[serde(default)]
    pub users: Vec<User>,
}

/// `POST`/`PUT /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Server confirmation.
    #[serde(default)]
    pub message: Option<String>,
    /// The stored account.
    #[serde(default)]
    pub user: Option<User>,
}

/// Confirmation body of mutations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Server confirmation.
    #[serde(default)]
    pub message: Option<String>,
}

/// Why a request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never got a response.
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("{message}")]
    Server {
        /// HTTP status.
        status: u16,
        /// Message from the body, or a generic status line.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Builds a server error from a status and the raw response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Server {
            status,
            message: server_message(body).unwrap_or_else(|| format!("HTTP error: {status}")),
        }
    }

    /// Text shown in a notification.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server {
                status, ..
            } => Some(*status),
            _ => None,
        }
    }
}

/// Pulls `error` or `message` out of a JSON error body.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"].into_iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        filters::{FilterField, FilterPatch, FilterState},
        query::stats_query,
    };

    #[test]
    fn context_normalizes_base_and_token() {
        let ctx = RequestContext::new("http://api.local/", Some("  ".into()));
        assert_eq!(ctx.url(paths::TRENDS), "http://api.local/api/trends");
        assert_eq!(ctx.authorization(), None);

        let signed = RequestContext::new("http://api.local", Some("abc".into()));
        assert_eq!(signed.authorization().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn url_with_appends_or_extends_query() {
        let ctx = RequestContext::new("http://api.local", None);
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Department, ["IT"]));
        let params = stats_query(&filters);

        assert_eq!(
            ctx.url_with(paths::TREND_STATS, &params),
            "http://api.local/api/trends/stats?department_name=IT"
        );
        assert_eq!(
            ctx.url_with(paths::DEPARTMENTS, &params),
            "http://api.local/api/departments?active_only=true&department_name=IT"
        );
        assert_eq!(ctx.url_with(paths::TRENDS, &QueryParams::default()), "http://api.local/api/trends");
    }

    #[test]
    fn server_errors_surface_body_message() {
        let err = ApiError::from_response(400, r#"{"error": "trend_ids is required"}"#);
        assert_eq!(err.user_message(), "trend_ids is required");
        assert_eq!(err.status(), Some(400));

        let fallback = ApiError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(fallback.user_message(), "HTTP error: 502");
    }

    #[test]
    fn listing_total_falls_back_to_row_count() {
        let body: TrendListResponse =
            serde_json::from_str(r#"{"trends": [{"id": 1}, {"id": 2}]}"#).expect("listing");
        assert_eq!(body.total(), 2);

        let with_total: TrendListResponse =
            serde_json::from_str(r#"{"trends": [{"id": 1}], "total": 31}"#).expect("listing");
        assert_eq!(with_total.total(), 31);
    }

    #[test]
    fn listing_keeps_rows_with_null_title() {
        let body: TrendListResponse =
            serde_json::from_str(r#"{"trends":[{"id":1,"title":"ok"},{"id":2,"title":null}],"total":2}"#)
                .expect("listing");
        assert_eq!(body.trends.len(), 2);
        assert_eq!(body.trends[1].title, "");
    }

    #[test]
    fn stats_keep_ranking_with_null_title() {
        let body: StatsResponse = serde_json::from_str(
            r#"{"stats":{"total_trends":1,"highest_impact":[{"id":5,"title":null,"impact_score":7.0}]}}"#,
        )
        .expect("stats");
        assert_eq!(body.stats.highest_impact[0].id, 5);
        assert_eq!(body.stats.highest_impact[0].title, "");
    }

    #[test]
    fn paths_embed_ids() {
        assert_eq!(paths::approve(42), "/api/trends/42/approve");
        assert_eq!(paths::disapprove(7), "/api/trends/7/disapprove");
        assert_eq!(paths::user(&"a b".to_string()), "/api/users/a%20b");
    }
}
