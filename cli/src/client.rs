//! HTTP client for the trends API.

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};
use trendboard_shared::{
    api::{
        paths, ApiError, CategoriesResponse, DepartmentsResponse, MessageResponse, RequestContext,
        StatsResponse, SubcategoriesResponse, TrendListResponse, TrendResponse, UserResponse,
        UsersResponse,
    },
    catalog::OptionCatalog,
    detail::pick_related,
    filters::FilterState,
    model::{Trend, TrendId, TrendStats},
    moderation::{BulkRequest, ModerationAction, ModerationTarget},
    query::{listing_query, related_query, stats_query, Pagination, QueryParams},
    users::{NewUser, User, UserId, UserPatch},
};

/// Client bound to one server and token.
pub struct ApiClient {
    http: reqwest::Client,
    ctx: RequestContext,
}

impl ApiClient {
    /// Client for `ctx`.
    pub fn new(ctx: RequestContext) -> Self {
        Self {
            http: reqwest::Client::new(),
            ctx,
        }
    }

    /// Server origin.
    pub fn base_url(&self) -> &str {
        self.ctx.base_url()
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.ctx.authorization() {
            Some(auth) => builder.header(reqwest::header::AUTHORIZATION, auth),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let resp = builder
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            debug!(status = status.as_u16(), body = %body, "request rejected");
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body).map_err(|err| ApiError::Parse(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> Result<T, ApiError> {
        let url = self.ctx.url_with(path, params);
        info!(url = %url, "GET");
        self.send(self.request(Method::GET, &url)).await
    }

    async fn with_body<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.ctx.url(path);
        info!(url = %url, method = %method, "sending");
        let builder = self.request(method, &url);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.send(builder).await
    }

    /// Active departments.
    pub async fn departments(&self) -> Result<DepartmentsResponse, ApiError> {
        self.get(paths::DEPARTMENTS, &QueryParams::default()).await
    }

    /// All categories.
    pub async fn categories(&self) -> Result<CategoriesResponse, ApiError> {
        self.get(paths::CATEGORIES, &QueryParams::default()).await
    }

    /// All subcategories.
    pub async fn subcategories(&self) -> Result<SubcategoriesResponse, ApiError> {
        self.get(paths::SUBCATEGORIES, &QueryParams::default()).await
    }

    /// The three catalog lists, fetched concurrently.
    pub async fn catalog(&self) -> Result<OptionCatalog, ApiError> {
        let (departments, categories, subcategories) =
            tokio::try_join!(self.departments(), self.categories(), self.subcategories())?;
        Ok(OptionCatalog {
            departments: departments.departments,
            categories: categories.categories,
            subcategories: subcategories.subcategories,
        })
    }

    /// One listing page.
    pub async fn trends(&self, filters: &FilterState, pagination: &Pagination) -> Result<TrendListResponse, ApiError> {
        let listing: TrendListResponse = self
            .get(paths::TRENDS, &listing_query(filters, pagination))
            .await?;
        info!(rows = listing.trends.len(), total = listing.total(), "listing loaded");
        Ok(listing)
    }

    /// Statistics for the filtered set.
    pub async fn stats(&self, filters: &FilterState) -> Result<TrendStats, ApiError> {
        let response: StatsResponse = self.get(paths::TREND_STATS, &stats_query(filters)).await?;
        Ok(response.stats)
    }

    /// One trend.
    pub async fn trend(&self, id: TrendId) -> Result<Trend, ApiError> {
        let response: TrendResponse = self.get(&paths::trend(id), &QueryParams::default()).await?;
        Ok(response.trend)
    }

    /// Trends sharing the category and first subcategory of `trend`.
    pub async fn related(&self, trend: &Trend) -> Result<Vec<Trend>, ApiError> {
        let listing: TrendListResponse = self.get(paths::TRENDS, &related_query(trend)).await?;
        Ok(pick_related(trend, listing.trends))
    }

    /// Approves or disapproves `target`.
    pub async fn moderate(&self, action: ModerationAction, target: &ModerationTarget) -> Result<MessageResponse, ApiError> {
        match (action, target) {
            (ModerationAction::Approve, ModerationTarget::Single(id)) => {
                self.with_body::<(), _>(Method::PUT, &paths::approve(*id), None).await
            },
            (ModerationAction::Disapprove, ModerationTarget::Single(id)) => {
                self.with_body::<(), _>(Method::DELETE, &paths::disapprove(*id), None)
                    .await
            },
            (ModerationAction::Approve, ModerationTarget::Bulk(ids)) => {
                let body = BulkRequest {
                    trend_ids: ids.clone(),
                };
                self.with_body(Method::PUT, paths::BULK_APPROVE, Some(&body)).await
            },
            (ModerationAction::Disapprove, ModerationTarget::Bulk(ids)) => {
                let body = BulkRequest {
                    trend_ids: ids.clone(),
                };
                self.with_body(Method::DELETE, paths::BULK_DISAPPROVE, Some(&body))
                    .await
            },
        }
    }

    /// All accounts.
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        let response: UsersResponse = self.get(paths::USERS, &QueryParams::default()).await?;
        Ok(response.users)
    }

    /// Creates an account.
    pub async fn create_user(&self, user: &NewUser) -> Result<UserResponse, ApiError> {
        self.with_body(Method::POST, paths::USERS, Some(user)).await
    }

    /// Applies a partial update.
    pub async fn update_user(&self, id: &UserId, patch: &UserPatch) -> Result<UserResponse, ApiError> {
        self.with_body(Method::PUT, &paths::user(id), Some(patch)).await
    }

    /// Deletes an account.
    pub async fn delete_user(&self, id: &UserId) -> Result<MessageResponse, ApiError> {
        self.with_body::<(), _>(Method::DELETE, &paths::user(id), None).await
    }
}
