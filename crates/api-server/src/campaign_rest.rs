//! Campaign CRUD and monthly performance REST endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracker_core::error::TrackerError;
use tracker_core::types::{
    Campaign, CreateCampaignRequest, MonthlyPerformance, PerformanceRecord, UpdateCampaignRequest,
};
use tracker_store::CampaignFilter;
use uuid::Uuid;

use crate::rest::{ApiError, AppState, ErrorBody};

/// Maximum length for free-text name fields.
const MAX_FIELD_LEN: usize = 256;

/// Validate a full campaign payload at the API boundary.
fn validate_campaign_request(request: &CreateCampaignRequest) -> Result<(), &'static str> {
    if request.name.trim().is_empty() {
        return Err("campaign 'name' must not be empty");
    }
    if request.name.len() > MAX_FIELD_LEN {
        return Err("campaign 'name' exceeds maximum length");
    }
    if request.budget < 0.0 {
        return Err("'budget' must be non-negative");
    }
    if request.amount_spent < 0.0 {
        return Err("'amount_spent' must be non-negative");
    }
    if request.start_date > request.end_date {
        return Err("'start_date' must not be after 'end_date'");
    }
    Ok(())
}

/// Validate the fields a partial update actually carries.
fn validate_campaign_patch(patch: &UpdateCampaignRequest) -> Result<(), &'static str> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err("campaign 'name' must not be empty");
        }
        if name.len() > MAX_FIELD_LEN {
            return Err("campaign 'name' exceeds maximum length");
        }
    }
    if patch.budget.is_some_and(|b| b < 0.0) {
        return Err("'budget' must be non-negative");
    }
    if patch.amount_spent.is_some_and(|a| a < 0.0) {
        return Err("'amount_spent' must be non-negative");
    }
    if let (Some(start), Some(end)) = (patch.start_date, patch.end_date) {
        if start > end {
            return Err("'start_date' must not be after 'end_date'");
        }
    }
    Ok(())
}

/// Spread a full payload over the partial-update shape so PUT and PATCH
/// share one store operation.
fn full_patch(request: CreateCampaignRequest) -> UpdateCampaignRequest {
    UpdateCampaignRequest {
        name: Some(request.name),
        description: request.description,
        platform: Some(request.platform),
        status: Some(request.status),
        budget: Some(request.budget),
        amount_spent: Some(request.amount_spent),
        start_date: Some(request.start_date),
        end_date: Some(request.end_date),
        target_audience: request.target_audience,
        goal: Some(request.goal),
        roi: request.roi,
    }
}

fn validation(msg: &str) -> ApiError {
    TrackerError::Validation(msg.to_string()).into()
}

fn campaign_not_found(id: Uuid) -> ApiError {
    TrackerError::NotFound(format!("campaign {id}")).into()
}

/// GET /api/campaigns lists campaigns, newest first.
#[utoipa::path(
    get,
    path = "/api/campaigns",
    tag = "Campaigns",
    params(
        ("status" = Option<String>, Query, description = "Filter by campaign status"),
        ("platform" = Option<String>, Query, description = "Filter by advertising platform"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on name"),
    ),
    responses(
        (status = 200, description = "Campaigns ordered by creation time, newest first", body = Vec<Campaign>),
    )
)]
pub async fn handle_list_campaigns(
    State(state): State<AppState>,
    Query(filter): Query<CampaignFilter>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let campaigns = state.store.list_campaigns(&filter).await?;
    Ok(Json(campaigns))
}

/// POST /api/campaigns creates a campaign.
#[utoipa::path(
    post,
    path = "/api/campaigns",
    tag = "Campaigns",
    request_body = CreateCampaignRequest,
    responses(
        (status = 201, description = "Campaign created", body = Campaign),
        (status = 400, description = "Invalid payload", body = ErrorBody),
    )
)]
pub async fn handle_create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    if let Err(msg) = validate_campaign_request(&request) {
        return Err(validation(msg));
    }
    let created = state.store.insert_campaign(Campaign::new(request)).await?;
    metrics::counter!("campaigns.created").increment(1);
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/campaigns/{id} fetches one campaign.
#[utoipa::path(
    get,
    path = "/api/campaigns/{id}",
    tag = "Campaigns",
    params(
        ("id" = Uuid, Path, description = "Campaign identifier"),
    ),
    responses(
        (status = 200, description = "Campaign found", body = Campaign),
        (status = 404, description = "Unknown campaign"),
    )
)]
pub async fn handle_get_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Campaign>, ApiError> {
    match state.store.get_campaign(id).await? {
        Some(campaign) => Ok(Json(campaign)),
        None => Err(campaign_not_found(id)),
    }
}

/// PUT /api/campaigns/{id} replaces a campaign's mutable fields.
#[utoipa::path(
    put,
    path = "/api/campaigns/{id}",
    tag = "Campaigns",
    params(
        ("id" = Uuid, Path, description = "Campaign identifier"),
    ),
    request_body = CreateCampaignRequest,
    responses(
        (status = 200, description = "Campaign updated", body = Campaign),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Unknown campaign"),
    )
)]
pub async fn handle_replace_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<Json<Campaign>, ApiError> {
    if let Err(msg) = validate_campaign_request(&request) {
        return Err(validation(msg));
    }
    let patch = full_patch(request);
    match state.store.update_campaign(id, &patch).await? {
        Some(campaign) => {
            metrics::counter!("campaigns.updated").increment(1);
            Ok(Json(campaign))
        }
        None => Err(campaign_not_found(id)),
    }
}

/// PATCH /api/campaigns/{id} applies a partial update.
#[utoipa::path(
    patch,
    path = "/api/campaigns/{id}",
    tag = "Campaigns",
    params(
        ("id" = Uuid, Path, description = "Campaign identifier"),
    ),
    request_body = UpdateCampaignRequest,
    responses(
        (status = 200, description = "Campaign updated", body = Campaign),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Unknown campaign"),
    )
)]
pub async fn handle_update_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, ApiError> {
    if let Err(msg) = validate_campaign_patch(&patch) {
        return Err(validation(msg));
    }
    match state.store.update_campaign(id, &patch).await? {
        Some(campaign) => {
            metrics::counter!("campaigns.updated").increment(1);
            Ok(Json(campaign))
        }
        None => Err(campaign_not_found(id)),
    }
}

/// DELETE /api/campaigns/{id} removes a campaign and its performance rows.
#[utoipa::path(
    delete,
    path = "/api/campaigns/{id}",
    tag = "Campaigns",
    params(
        ("id" = Uuid, Path, description = "Campaign identifier"),
    ),
    responses(
        (status = 204, description = "Campaign deleted"),
        (status = 404, description = "Unknown campaign"),
    )
)]
pub async fn handle_delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_campaign(id).await? {
        metrics::counter!("campaigns.deleted").increment(1);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(campaign_not_found(id))
    }
}

/// GET /api/campaigns/{id}/performance lists a campaign's monthly rows.
#[utoipa::path(
    get,
    path = "/api/campaigns/{id}/performance",
    tag = "Performance",
    params(
        ("id" = Uuid, Path, description = "Campaign identifier"),
    ),
    responses(
        (status = 200, description = "Monthly rows ordered by month ascending", body = Vec<MonthlyPerformance>),
        (status = 404, description = "Unknown campaign"),
    )
)]
pub async fn handle_list_performance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MonthlyPerformance>>, ApiError> {
    if state.store.get_campaign(id).await?.is_none() {
        return Err(campaign_not_found(id));
    }
    let rows = state.store.list_performance(id).await?;
    Ok(Json(rows))
}

/// PUT /api/campaigns/{id}/performance upserts a batch of monthly rows.
/// The body must be a JSON array; ROI is recomputed server-side.
#[utoipa::path(
    put,
    path = "/api/campaigns/{id}/performance",
    tag = "Performance",
    params(
        ("id" = Uuid, Path, description = "Campaign identifier"),
    ),
    request_body = Vec<PerformanceRecord>,
    responses(
        (status = 200, description = "Persisted rows (order unspecified)", body = Vec<MonthlyPerformance>),
        (status = 400, description = "Malformed batch", body = ErrorBody),
        (status = 404, description = "Unknown campaign"),
    )
)]
pub async fn handle_upsert_performance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<MonthlyPerformance>>, ApiError> {
    if state.store.get_campaign(id).await?.is_none() {
        return Err(campaign_not_found(id));
    }
    let rows = state.pipeline.upsert_monthly(id, body).await?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tracker_core::types::{CampaignStatus, Goal, Platform};

    fn request(start: (i32, u32, u32), end: (i32, u32, u32)) -> CreateCampaignRequest {
        CreateCampaignRequest {
            name: "Spring Push".to_string(),
            description: None,
            platform: Platform::Facebook,
            status: CampaignStatus::Active,
            budget: 5_000.0,
            amount_spent: 0.0,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            target_audience: None,
            goal: Goal::Sales,
            roi: None,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        assert!(validate_campaign_request(&request((2026, 1, 1), (2026, 6, 30))).is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_dates() {
        let err = validate_campaign_request(&request((2026, 6, 30), (2026, 1, 1))).unwrap_err();
        assert!(err.contains("start_date"));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut req = request((2026, 1, 1), (2026, 6, 30));
        req.name = "   ".to_string();
        assert!(validate_campaign_request(&req).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_budget() {
        let mut req = request((2026, 1, 1), (2026, 6, 30));
        req.budget = -1.0;
        assert!(validate_campaign_request(&req).is_err());
    }

    #[test]
    fn test_patch_validation_only_checks_present_fields() {
        let patch = UpdateCampaignRequest {
            budget: Some(100.0),
            ..Default::default()
        };
        assert!(validate_campaign_patch(&patch).is_ok());

        let patch = UpdateCampaignRequest {
            budget: Some(-100.0),
            ..Default::default()
        };
        assert!(validate_campaign_patch(&patch).is_err());
    }

    #[test]
    fn test_patch_validation_checks_date_order_when_both_present() {
        let patch = UpdateCampaignRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            ..Default::default()
        };
        assert!(validate_campaign_patch(&patch).is_err());
    }

    #[test]
    fn test_full_patch_carries_every_field() {
        let patch = full_patch(request((2026, 1, 1), (2026, 6, 30)));
        assert!(!patch.is_empty());
        assert_eq!(patch.name.as_deref(), Some("Spring Push"));
        assert_eq!(patch.status, Some(CampaignStatus::Active));
        assert_eq!(patch.budget, Some(5_000.0));
    }
}
