//! Dashboard aggregation REST endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracker_analytics::{aggregate_monthly, compute_stats, DashboardStats};
use utoipa::ToSchema;

use crate::rest::{ApiError, AppState};

/// One month in the dashboard chart series. `name` is the month key in
/// `YYYY-MM` form.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeriesPoint {
    pub name: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
}

/// GET /api/dashboard/stats returns the headline summary numbers.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Campaign counts, budget total and mean ROI", body = DashboardStats),
    )
)]
pub async fn handle_dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let campaigns = state.store.campaign_stat_rows().await?;
    let rois = state.store.performance_rois().await?;
    Ok(Json(compute_stats(&campaigns, &rois)))
}

/// GET /api/dashboard/performance returns per-month totals across all
/// campaigns, month ascending.
#[utoipa::path(
    get,
    path = "/api/dashboard/performance",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Monthly totals for the dashboard chart", body = Vec<SeriesPoint>),
    )
)]
pub async fn handle_dashboard_performance(
    State(state): State<AppState>,
) -> Result<Json<Vec<SeriesPoint>>, ApiError> {
    let rows = state.store.list_all_performance().await?;
    let series = aggregate_monthly(&rows)
        .into_iter()
        .map(|totals| SeriesPoint {
            name: totals.month.format("%Y-%m").to_string(),
            impressions: totals.impressions,
            clicks: totals.clicks,
            conversions: totals.conversions,
            spend: totals.spend,
            revenue: totals.revenue,
        })
        .collect();
    Ok(Json(series))
}
