//! Dashboard summary statistics.

use serde::Serialize;
use tracker_core::roi::round2;
use tracker_core::types::{CampaignStatRow, CampaignStatus};
use utoipa::ToSchema;

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_campaigns: u64,
    pub active_campaigns: u64,
    pub total_budget: f64,
    /// Mean ROI over stored performance rows, rounded to two decimals.
    pub avg_roi: f64,
}

/// Compute the dashboard summary from campaign rows and the stored per-month
/// ROI values. A missing budget counts as zero; an empty ROI set yields 0.0.
pub fn compute_stats(campaigns: &[CampaignStatRow], performance_rois: &[f64]) -> DashboardStats {
    let total_campaigns = campaigns.len() as u64;
    let active_campaigns = campaigns
        .iter()
        .filter(|c| c.status == CampaignStatus::Active)
        .count() as u64;
    let total_budget = campaigns.iter().map(|c| c.budget.unwrap_or(0.0)).sum();
    let avg_roi = if performance_rois.is_empty() {
        0.0
    } else {
        round2(performance_rois.iter().sum::<f64>() / performance_rois.len() as f64)
    };
    DashboardStats {
        total_campaigns,
        active_campaigns,
        total_budget,
        avg_roi,
    }
}
