//! Storage backends for campaigns and their monthly performance rows.
//!
//! [`RestStore`] talks to the hosted table store over HTTP; [`MemoryStore`]
//! provides the same surface in-process for development and testing.

pub mod demo;
pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;
use serde::Deserialize;
use tracker_core::error::TrackerResult;
use tracker_core::types::{
    Campaign, CampaignStatRow, CampaignStatus, MonthlyPerformance, PerformanceWrite, Platform,
    UpdateCampaignRequest,
};
use uuid::Uuid;

/// Campaign listing filters, combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignFilter {
    pub status: Option<CampaignStatus>,
    pub platform: Option<Platform>,
    /// Case-insensitive substring match on the campaign name.
    pub search: Option<String>,
}

/// Table-store operations used by the HTTP handlers and the analytics
/// reducers. Implementations are treated as network-attached and fallible;
/// every call carries a bounded timeout.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Campaigns matching `filter`, newest first.
    async fn list_campaigns(&self, filter: &CampaignFilter) -> TrackerResult<Vec<Campaign>>;

    async fn get_campaign(&self, id: Uuid) -> TrackerResult<Option<Campaign>>;

    async fn insert_campaign(&self, campaign: Campaign) -> TrackerResult<Campaign>;

    /// Partial update. Returns `None` when the campaign does not exist.
    async fn update_campaign(
        &self,
        id: Uuid,
        patch: &UpdateCampaignRequest,
    ) -> TrackerResult<Option<Campaign>>;

    /// Removes the campaign and all of its performance rows. Returns `false`
    /// when the campaign does not exist.
    async fn delete_campaign(&self, id: Uuid) -> TrackerResult<bool>;

    /// Performance rows for one campaign, ascending by month.
    async fn list_performance(&self, campaign_id: Uuid)
        -> TrackerResult<Vec<MonthlyPerformance>>;

    /// Every performance row across all campaigns, in store order.
    async fn list_all_performance(&self) -> TrackerResult<Vec<MonthlyPerformance>>;

    /// Batch upsert resolved by row id when present, otherwise by the
    /// `(campaign_id, month)` natural key. The batch is written as a single
    /// store operation; returns the materialized rows.
    async fn upsert_performance(
        &self,
        rows: Vec<PerformanceWrite>,
    ) -> TrackerResult<Vec<MonthlyPerformance>>;

    /// `{status, budget}` projection of every campaign.
    async fn campaign_stat_rows(&self) -> TrackerResult<Vec<CampaignStatRow>>;

    /// ROI values of every performance row that has one.
    async fn performance_rois(&self) -> TrackerResult<Vec<f64>>;
}
