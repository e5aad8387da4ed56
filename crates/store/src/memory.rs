//! In-memory store backed by DashMap.
//!
//! Mirrors the hosted table store's surface for development and testing,
//! including its key constraints: one row per `(campaign_id, month)` and
//! performance rows that cannot outlive their campaign.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use tracing::info;
use tracker_core::error::{TrackerError, TrackerResult};
use tracker_core::types::{
    Campaign, CampaignStatRow, MonthlyPerformance, PerformanceWrite, UpdateCampaignRequest,
};
use uuid::Uuid;

use crate::{CampaignFilter, CampaignStore};

#[derive(Default)]
pub struct MemoryStore {
    campaigns: DashMap<Uuid, Campaign>,
    performance: DashMap<Uuid, MonthlyPerformance>,
    // Admits one performance writer at a time; the upsert clash checks and
    // the delete cascade assume the maps do not change underneath them.
    write_gate: parking_lot::Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        info!("Memory store initialized (in-memory, development mode)");
        Self::default()
    }

    /// A store pre-populated with the demo dataset.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        let (campaigns, rows) = crate::demo::dataset();
        for campaign in campaigns {
            store.campaigns.insert(campaign.id, campaign);
        }
        for row in rows {
            store.performance.insert(row.id, row);
        }
        store
    }

    fn find_by_natural_key(&self, campaign_id: Uuid, month: NaiveDate) -> Option<Uuid> {
        self.performance
            .iter()
            .find(|r| r.value().campaign_id == campaign_id && r.value().month == month)
            .map(|r| *r.key())
    }
}

#[async_trait]
impl CampaignStore for MemoryStore {
    async fn list_campaigns(&self, filter: &CampaignFilter) -> TrackerResult<Vec<Campaign>> {
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut campaigns: Vec<Campaign> = self
            .campaigns
            .iter()
            .map(|r| r.value().clone())
            .filter(|c| filter.status.map_or(true, |s| c.status == s))
            .filter(|c| filter.platform.map_or(true, |p| c.platform == p))
            .filter(|c| {
                search
                    .as_ref()
                    .map_or(true, |s| c.name.to_lowercase().contains(s))
            })
            .collect();
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(campaigns)
    }

    async fn get_campaign(&self, id: Uuid) -> TrackerResult<Option<Campaign>> {
        Ok(self.campaigns.get(&id).map(|r| r.value().clone()))
    }

    async fn insert_campaign(&self, campaign: Campaign) -> TrackerResult<Campaign> {
        self.campaigns.insert(campaign.id, campaign.clone());
        Ok(campaign)
    }

    async fn update_campaign(
        &self,
        id: Uuid,
        patch: &UpdateCampaignRequest,
    ) -> TrackerResult<Option<Campaign>> {
        Ok(self.campaigns.get_mut(&id).map(|mut entry| {
            let c = entry.value_mut();
            let patch = patch.clone();
            if let Some(name) = patch.name {
                c.name = name;
            }
            if let Some(description) = patch.description {
                c.description = Some(description);
            }
            if let Some(platform) = patch.platform {
                c.platform = platform;
            }
            if let Some(status) = patch.status {
                c.status = status;
            }
            if let Some(budget) = patch.budget {
                c.budget = budget;
            }
            if let Some(amount_spent) = patch.amount_spent {
                c.amount_spent = amount_spent;
            }
            if let Some(start_date) = patch.start_date {
                c.start_date = start_date;
            }
            if let Some(end_date) = patch.end_date {
                c.end_date = end_date;
            }
            if let Some(target_audience) = patch.target_audience {
                c.target_audience = Some(target_audience);
            }
            if let Some(goal) = patch.goal {
                c.goal = goal;
            }
            if let Some(roi) = patch.roi {
                c.roi = Some(roi);
            }
            c.clone()
        }))
    }

    async fn delete_campaign(&self, id: Uuid) -> TrackerResult<bool> {
        let _gate = self.write_gate.lock();
        let removed = self.campaigns.remove(&id).is_some();
        if removed {
            // Also remove associated performance rows
            let row_ids: Vec<Uuid> = self
                .performance
                .iter()
                .filter(|r| r.value().campaign_id == id)
                .map(|r| *r.key())
                .collect();
            for rid in row_ids {
                self.performance.remove(&rid);
            }
        }
        Ok(removed)
    }

    async fn list_performance(
        &self,
        campaign_id: Uuid,
    ) -> TrackerResult<Vec<MonthlyPerformance>> {
        let mut rows: Vec<MonthlyPerformance> = self
            .performance
            .iter()
            .filter(|r| r.value().campaign_id == campaign_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| a.month.cmp(&b.month));
        Ok(rows)
    }

    async fn list_all_performance(&self) -> TrackerResult<Vec<MonthlyPerformance>> {
        Ok(self.performance.iter().map(|r| r.value().clone()).collect())
    }

    async fn upsert_performance(
        &self,
        rows: Vec<PerformanceWrite>,
    ) -> TrackerResult<Vec<MonthlyPerformance>> {
        // Stage and validate the whole batch before applying any row, so a
        // bad record cannot leave siblings half-written.
        let _gate = self.write_gate.lock();
        let mut staged: Vec<MonthlyPerformance> = Vec::with_capacity(rows.len());
        let mut seen: HashSet<(Uuid, NaiveDate)> = HashSet::new();
        let mut seen_ids: HashSet<Uuid> = HashSet::new();

        for row in rows {
            if !self.campaigns.contains_key(&row.campaign_id) {
                return Err(TrackerError::Store(format!(
                    "foreign key violation: unknown campaign {}",
                    row.campaign_id
                )));
            }
            if !seen.insert((row.campaign_id, row.month)) {
                return Err(TrackerError::Store(format!(
                    "duplicate key (campaign_id, month) = ({}, {})",
                    row.campaign_id, row.month
                )));
            }
            let id = row
                .id
                .or_else(|| self.find_by_natural_key(row.campaign_id, row.month))
                .unwrap_or_else(Uuid::new_v4);
            // Two staged rows must not land on the same map key, whether the
            // id was given explicitly or resolved from an existing month.
            if !seen_ids.insert(id) {
                return Err(TrackerError::Store(format!("duplicate key id = {id}")));
            }
            staged.push(MonthlyPerformance {
                id,
                campaign_id: row.campaign_id,
                month: row.month,
                impressions: row.impressions,
                clicks: row.clicks,
                conversions: row.conversions,
                spend: row.spend,
                revenue: row.revenue,
                roi: row.roi,
            });
        }

        for row in &staged {
            let month_taken = self.performance.iter().any(|r| {
                r.value().campaign_id == row.campaign_id
                    && r.value().month == row.month
                    && *r.key() != row.id
            });
            if month_taken {
                return Err(TrackerError::Store(format!(
                    "duplicate key (campaign_id, month) = ({}, {})",
                    row.campaign_id, row.month
                )));
            }
            let id_taken = self.performance.get(&row.id).map_or(false, |r| {
                r.value().campaign_id != row.campaign_id || r.value().month != row.month
            });
            if id_taken {
                return Err(TrackerError::Store(format!("duplicate key id = {}", row.id)));
            }
        }

        for row in &staged {
            self.performance.insert(row.id, row.clone());
        }
        Ok(staged)
    }

    async fn campaign_stat_rows(&self) -> TrackerResult<Vec<CampaignStatRow>> {
        Ok(self
            .campaigns
            .iter()
            .map(|r| CampaignStatRow {
                status: r.value().status,
                budget: Some(r.value().budget),
            })
            .collect())
    }

    async fn performance_rois(&self) -> TrackerResult<Vec<f64>> {
        Ok(self.performance.iter().map(|r| r.value().roi).collect())
    }
}
