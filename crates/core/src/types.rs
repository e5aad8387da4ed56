//! Campaign domain types shared across the workspace.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ─── Campaign ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub platform: Platform,
    pub status: CampaignStatus,
    pub budget: f64,
    #[serde(default)]
    pub amount_spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub target_audience: Option<String>,
    pub goal: Goal,
    /// Campaign-level ROI as last written by a client; the derived per-month
    /// ROI lives on [`MonthlyPerformance`] rows.
    #[serde(default)]
    pub roi: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Advertising channel. Wire values are the display names used by the
/// dashboard ("Google Ads", not "google_ads").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum Platform {
    #[serde(rename = "Google Ads")]
    GoogleAds,
    Facebook,
    Instagram,
    LinkedIn,
    Email,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
    Draft,
}

impl Default for CampaignStatus {
    fn default() -> Self {
        CampaignStatus::Draft
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum Goal {
    #[serde(rename = "Brand Awareness")]
    BrandAwareness,
    #[serde(rename = "Lead Generation")]
    LeadGeneration,
    Sales,
    Traffic,
    Engagement,
}

impl Campaign {
    /// Build a new campaign from a create request, assigning the id and
    /// creation timestamp server-side.
    pub fn new(req: CreateCampaignRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: req.name,
            description: req.description,
            platform: req.platform,
            status: req.status,
            budget: req.budget,
            amount_spent: req.amount_spent,
            start_date: req.start_date,
            end_date: req.end_date,
            target_audience: req.target_audience,
            goal: req.goal,
            roi: req.roi,
            created_at: Utc::now(),
        }
    }
}

impl Platform {
    /// Wire spelling, for filter expressions sent to the table store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::GoogleAds => "Google Ads",
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::LinkedIn => "LinkedIn",
            Platform::Email => "Email",
        }
    }
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Completed => "Completed",
            CampaignStatus::Draft => "Draft",
        }
    }
}

// ─── Monthly Performance ───────────────────────────────────────────────────

/// One persisted month of metrics for a campaign. `(campaign_id, month)` is
/// unique; `month` is always the first day of its calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyPerformance {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub month: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
    /// Derived at write time from spend and revenue, never client-supplied.
    pub roi: f64,
}

/// Raw client record in a performance upsert batch. Counters and money
/// default to zero when absent; `id` targets an existing row when present.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PerformanceRecord {
    pub month: String,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub id: Option<Uuid>,
}

/// Normalized row ready for the store's batch upsert.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub campaign_id: Uuid,
    pub month: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
    pub roi: f64,
}

/// Projection of a campaign used by the dashboard stats reducer. `budget`
/// is optional because the store may hold rows written before the column
/// was required.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignStatRow {
    pub status: CampaignStatus,
    #[serde(default)]
    pub budget: Option<f64>,
}

// ─── API Request types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCampaignRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub platform: Platform,
    #[serde(default)]
    pub status: CampaignStatus,
    pub budget: f64,
    #[serde(default)]
    pub amount_spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub target_audience: Option<String>,
    pub goal: Goal,
    #[serde(default)]
    pub roi: Option<f64>,
}

/// Partial update; absent fields are left untouched. Serializes without
/// absent fields so the table store's PATCH sees only the changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCampaignRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_spent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
}

impl UpdateCampaignRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.platform.is_none()
            && self.status.is_none()
            && self.budget.is_none()
            && self.amount_spent.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.target_audience.is_none()
            && self.goal.is_none()
            && self.roi.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_wire_names_match_serde() {
        for platform in [
            Platform::GoogleAds,
            Platform::Facebook,
            Platform::Instagram,
            Platform::LinkedIn,
            Platform::Email,
        ] {
            assert_eq!(
                serde_json::json!(platform),
                serde_json::json!(platform.as_str())
            );
        }
    }

    #[test]
    fn test_status_wire_names_match_serde() {
        for status in [
            CampaignStatus::Active,
            CampaignStatus::Paused,
            CampaignStatus::Completed,
            CampaignStatus::Draft,
        ] {
            assert_eq!(serde_json::json!(status), serde_json::json!(status.as_str()));
        }
    }

    #[test]
    fn test_status_defaults_to_draft() {
        assert_eq!(CampaignStatus::default(), CampaignStatus::Draft);
    }

    #[test]
    fn test_performance_record_fills_missing_counters() {
        let record: PerformanceRecord =
            serde_json::from_value(serde_json::json!({"month": "2026-01"})).unwrap();
        assert_eq!(record.impressions, 0);
        assert_eq!(record.clicks, 0);
        assert_eq!(record.conversions, 0);
        assert!(record.spend.abs() < f64::EPSILON);
        assert!(record.revenue.abs() < f64::EPSILON);
        assert!(record.id.is_none());
    }

    #[test]
    fn test_update_request_serializes_only_present_fields() {
        let patch = UpdateCampaignRequest {
            budget: Some(1500.0),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({"budget": 1500.0}));
    }
}
