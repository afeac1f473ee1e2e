//! Network layer. Every call reads the token again through
//! `session::request_context`, so nothing is cached between requests.

#[cfg(not(feature = "mock"))]
use gloo_net::http::{Request, RequestBuilder};
#[cfg(not(feature = "mock"))]
use serde::{de::DeserializeOwned, Serialize};
#[cfg(not(feature = "mock"))]
use trendboard_shared::api::{
    paths, CategoriesResponse, DepartmentsResponse, MessageResponse, RequestContext, StatsResponse,
    SubcategoriesResponse, UsersResponse,
};
#[cfg(not(feature = "mock"))]
use trendboard_shared::moderation::BulkRequest;
use trendboard_shared::{
    api::{ApiError, TrendListResponse},
    catalog::OptionCatalog,
    model::TrendStats,
    moderation::{ModerationAction, ModerationTarget},
    query::QueryParams,
    users::{NewUser, User, UserId, UserPatch},
};

#[cfg(not(feature = "mock"))]
use crate::session;
#[cfg(feature = "mock")]
use crate::models;

#[cfg(not(feature = "mock"))]
fn authorized(builder: RequestBuilder, ctx: &RequestContext) -> RequestBuilder {
    match ctx.authorization() {
        Some(auth) => builder.header("Authorization", &auth),
        None => builder,
    }
}

#[cfg(not(feature = "mock"))]
async fn send<T: DeserializeOwned>(request: Result<Request, gloo_net::Error>) -> Result<T, ApiError> {
    let response = request
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !response.ok() {
        return Err(ApiError::from_response(status, &body));
    }
    let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
    serde_json::from_str(body).map_err(|e| ApiError::Parse(format!("{:?}", e)))
}

#[cfg(not(feature = "mock"))]
async fn get<T: DeserializeOwned>(path: &str, params: &QueryParams) -> Result<T, ApiError> {
    let ctx = session::request_context();
    let url = ctx.url_with(path, params);
    send(authorized(Request::get(&url), &ctx).build()).await
}

#[cfg(not(feature = "mock"))]
async fn write<B: Serialize>(builder: fn(&str) -> RequestBuilder, path: &str, body: Option<&B>) -> Result<(), ApiError> {
    let ctx = session::request_context();
    let url = ctx.url(path);
    let builder = authorized(builder(&url), &ctx);
    let request = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    };
    send::<MessageResponse>(request).await.map(|_| ())
}

/// Departments, categories and subcategories.
pub async fn fetch_catalog() -> Result<OptionCatalog, ApiError> {
    #[cfg(feature = "mock")]
    {
        return Ok(models::mock_catalog());
    }

    #[cfg(not(feature = "mock"))]
    {
        let no_params = QueryParams::default();
        let (departments, categories, subcategories) = futures::try_join!(
            get::<DepartmentsResponse>(paths::DEPARTMENTS, &no_params),
            get::<CategoriesResponse>(paths::CATEGORIES, &no_params),
            get::<SubcategoriesResponse>(paths::SUBCATEGORIES, &no_params),
        )?;
        Ok(OptionCatalog {
            departments: departments.departments,
            categories: categories.categories,
            subcategories: subcategories.subcategories,
        })
    }
}

/// One listing page for `params`.
pub async fn fetch_trends(params: &QueryParams) -> Result<TrendListResponse, ApiError> {
    #[cfg(feature = "mock")]
    {
        let filters = mock::filters_from(params);
        let matching: Vec<_> = models::mock_trends()
            .into_iter()
            .filter(|trend| filters.matches(trend))
            .collect();
        let total = matching.len() as u64;
        let (page, limit) = mock::paging(params);
        let trends = matching.into_iter().skip((page - 1) * limit).take(limit).collect();
        return Ok(TrendListResponse {
            trends,
            total: Some(total),
        });
    }

    #[cfg(not(feature = "mock"))]
    {
        get(paths::TRENDS, params).await
    }
}

/// Statistics for the filters in `params`.
pub async fn fetch_stats(params: &QueryParams) -> Result<TrendStats, ApiError> {
    #[cfg(feature = "mock")]
    {
        let filters = mock::filters_from(params);
        let trends: Vec<_> = models::mock_trends()
            .into_iter()
            .filter(|trend| filters.matches(trend))
            .collect();
        return Ok(mock::stats_for(&trends));
    }

    #[cfg(not(feature = "mock"))]
    {
        let response: StatsResponse = get(paths::TREND_STATS, params).await?;
        Ok(response.stats)
    }
}

/// Approves or disapproves one trend or the selection.
pub async fn moderate(action: ModerationAction, target: &ModerationTarget) -> Result<(), ApiError> {
    #[cfg(feature = "mock")]
    {
        let _ = (action, target);
        return Ok(());
    }

    #[cfg(not(feature = "mock"))]
    {
        match (action, target) {
            (ModerationAction::Approve, ModerationTarget::Single(id)) => {
                write::<()>(Request::put, &paths::approve(*id), None).await
            },
            (ModerationAction::Disapprove, ModerationTarget::Single(id)) => {
                write::<()>(Request::delete, &paths::disapprove(*id), None).await
            },
            (ModerationAction::Approve, ModerationTarget::Bulk(ids)) => {
                let body = BulkRequest {
                    trend_ids: ids.clone(),
                };
                write(Request::put, paths::BULK_APPROVE, Some(&body)).await
            },
            (ModerationAction::Disapprove, ModerationTarget::Bulk(ids)) => {
                let body = BulkRequest {
                    trend_ids: ids.clone(),
                };
                write(Request::delete, paths::BULK_DISAPPROVE, Some(&body)).await
            },
        }
    }
}

/// All user accounts.
pub async fn fetch_users() -> Result<Vec<User>, ApiError> {
    #[cfg(feature = "mock")]
    {
        return Ok(models::mock_users());
    }

    #[cfg(not(feature = "mock"))]
    {
        let response: UsersResponse = get(paths::USERS, &QueryParams::default()).await?;
        Ok(response.users)
    }
}

/// Creates an account.
pub async fn create_user(user: &NewUser) -> Result<(), ApiError> {
    #[cfg(feature = "mock")]
    {
        let _ = user;
        return Ok(());
    }

    #[cfg(not(feature = "mock"))]
    {
        write(Request::post, paths::USERS, Some(user)).await
    }
}

/// Partial update of an account.
pub async fn update_user(id: &UserId, patch: &UserPatch) -> Result<(), ApiError> {
    #[cfg(feature = "mock")]
    {
        let _ = (id, patch);
        return Ok(());
    }

    #[cfg(not(feature = "mock"))]
    {
        write(Request::put, &paths::user(id), Some(patch)).await
    }
}

/// Deletes an account.
pub async fn delete_user(id: &UserId) -> Result<(), ApiError> {
    #[cfg(feature = "mock")]
    {
        let _ = id;
        return Ok(());
    }

    #[cfg(not(feature = "mock"))]
    {
        write::<()>(Request::delete, &paths::user(id), None).await
    }
}

#[cfg(feature = "mock")]
mod mock {
    use std::collections::BTreeMap;

    use trendboard_shared::{
        filters::{FilterField, FilterPatch, FilterState},
        model::{ImpactLabel, RankedTrend, Trend, TrendStats},
        query::{PageSize, QueryParams},
    };

    pub fn filters_from(params: &QueryParams) -> FilterState {
        let patch = FilterField::ALL
            .iter()
            .fold(FilterPatch::new(), |patch, field| patch.set(*field, params.values(field.param())));
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(patch);
        filters
    }

    pub fn paging(params: &QueryParams) -> (usize, usize) {
        let read = |key: &str| params.values(key).first().and_then(|raw| raw.parse::<usize>().ok());
        let page = read("page").unwrap_or(1).max(1);
        let limit = read("limit").unwrap_or(PageSize::default().get() as usize).max(1);
        (page, limit)
    }

    pub fn stats_for(trends: &[Trend]) -> TrendStats {
        let mut stats = TrendStats {
            total_trends: trends.len() as u64,
            ..TrendStats::default()
        };
        let bump = |map: &mut BTreeMap<String, u64>, key: Option<&str>| {
            if let Some(key) = key {
                *map.entry(key.to_string()).or_default() += 1;
            }
        };
        for trend in trends {
            bump(&mut stats.by_category, trend.category_name());
            bump(&mut stats.by_department, trend.department_name.as_deref());
            match trend.impact() {
                ImpactLabel::VeryHigh => stats.by_impact.very_high += 1,
                ImpactLabel::High => stats.by_impact.high += 1,
                ImpactLabel::Medium => stats.by_impact.medium += 1,
                ImpactLabel::Low => stats.by_impact.low += 1,
            }
        }
        let mut ranked: Vec<&Trend> = trends.iter().collect();
        ranked.sort_by(|a, b| b.impact_score.unwrap_or(0.0).total_cmp(&a.impact_score.unwrap_or(0.0)));
        stats.highest_impact = ranked
            .into_iter()
            .take(5)
            .map(|trend| RankedTrend {
                id: trend.id,
                title: trend.title.clone(),
                impact_score: trend.impact_score.unwrap_or(0.0),
                category: trend.category_name().map(str::to_string),
            })
            .collect();
        stats
    }
}
