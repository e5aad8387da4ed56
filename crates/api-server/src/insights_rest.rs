//! Trend-insights and news search REST endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracker_insights::{trend_report, NewsSearchResponse, TrendReport, DEFAULT_QUERY};

use crate::rest::{ApiError, AppState, ErrorBody};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// GET /api/insights/trends returns the trend report for a search query.
#[utoipa::path(
    get,
    path = "/api/insights/trends",
    tag = "Insights",
    params(
        ("query" = Option<String>, Query, description = "Search query, defaults to \"digital marketing\""),
    ),
    responses(
        (status = 200, description = "Trend report", body = TrendReport),
    )
)]
pub async fn handle_trends(Query(params): Query<SearchParams>) -> Json<TrendReport> {
    let query = params.query.as_deref().unwrap_or(DEFAULT_QUERY);
    Json(trend_report(query))
}

/// GET /api/news/search proxies an article search to the news API.
#[utoipa::path(
    get,
    path = "/api/news/search",
    tag = "Insights",
    params(
        ("query" = Option<String>, Query, description = "Search query, defaults to \"digital marketing\""),
    ),
    responses(
        (status = 200, description = "Matching articles", body = NewsSearchResponse),
        (status = 500, description = "News API unreachable or rejected the request", body = ErrorBody),
    )
)]
pub async fn handle_news_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<NewsSearchResponse>, ApiError> {
    let query = params.query.as_deref().unwrap_or(DEFAULT_QUERY);
    let results = state.news.search(query).await?;
    Ok(Json(results))
}
