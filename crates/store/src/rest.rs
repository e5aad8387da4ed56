//! HTTP client for the hosted table store (PostgREST-style API).
//!
//! Every operation maps to one request against `{base}/rest/v1/{table}`;
//! filters ride in the query string (`id=eq.<uuid>`, `name=ilike.%term%`)
//! and writes ask for `return=representation` so callers get the
//! materialized rows back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use tracing::{debug, instrument};
use tracker_core::config::StoreConfig;
use tracker_core::error::{TrackerError, TrackerResult};
use tracker_core::types::{
    Campaign, CampaignStatRow, MonthlyPerformance, PerformanceWrite, UpdateCampaignRequest,
};
use url::Url;
use uuid::Uuid;

use crate::{CampaignFilter, CampaignStore};

const CAMPAIGNS_TABLE: &str = "campaigns_campaign";
const PERFORMANCE_TABLE: &str = "campaigns_monthlyperformance";

pub struct RestStore {
    http: reqwest::Client,
    base: String,
}

impl RestStore {
    /// Build a store client from configuration. Constructed once at process
    /// start; handlers share it by reference.
    pub fn new(config: &StoreConfig) -> TrackerResult<Self> {
        let base = Url::parse(&config.url)
            .map_err(|e| TrackerError::Config(format!("invalid store url: {e}")))?;

        let key = config.effective_key();
        if key.is_empty() {
            return Err(TrackerError::Config(
                "store key is not configured (anon_key or service_role_key)".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(key)
            .map_err(|e| TrackerError::Config(format!("invalid store key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| TrackerError::Config(format!("invalid store key: {e}")))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| TrackerError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base, table)
    }
}

fn request_err(e: reqwest::Error) -> TrackerError {
    TrackerError::Store(format!("table store request failed: {e}"))
}

/// Reject non-2xx responses, carrying the store's error body for diagnosis.
async fn check(response: reqwest::Response) -> TrackerResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TrackerError::Store(format!(
        "table store returned {status}: {body}"
    )))
}

#[derive(Debug, Deserialize)]
struct RoiRow {
    roi: Option<f64>,
}

#[async_trait]
impl CampaignStore for RestStore {
    #[instrument(skip(self))]
    async fn list_campaigns(&self, filter: &CampaignFilter) -> TrackerResult<Vec<Campaign>> {
        let mut request = self
            .http
            .get(self.table_url(CAMPAIGNS_TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        if let Some(status) = filter.status {
            request = request.query(&[("status", format!("eq.{}", status.as_str()))]);
        }
        if let Some(platform) = filter.platform {
            request = request.query(&[("platform", format!("eq.{}", platform.as_str()))]);
        }
        if let Some(search) = &filter.search {
            request = request.query(&[("name", format!("ilike.%{search}%"))]);
        }

        let response = check(request.send().await.map_err(request_err)?).await?;
        response.json().await.map_err(request_err)
    }

    async fn get_campaign(&self, id: Uuid) -> TrackerResult<Option<Campaign>> {
        let id_filter = format!("eq.{id}");
        let response = self
            .http
            .get(self.table_url(CAMPAIGNS_TABLE))
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .send()
            .await
            .map_err(request_err)?;
        let rows: Vec<Campaign> = check(response).await?.json().await.map_err(request_err)?;
        Ok(rows.into_iter().next())
    }

    async fn insert_campaign(&self, campaign: Campaign) -> TrackerResult<Campaign> {
        let response = self
            .http
            .post(self.table_url(CAMPAIGNS_TABLE))
            .header("Prefer", "return=representation")
            .json(&campaign)
            .send()
            .await
            .map_err(request_err)?;
        let rows: Vec<Campaign> = check(response).await?.json().await.map_err(request_err)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| TrackerError::Store("insert returned no rows".to_string()))
    }

    async fn update_campaign(
        &self,
        id: Uuid,
        patch: &UpdateCampaignRequest,
    ) -> TrackerResult<Option<Campaign>> {
        if patch.is_empty() {
            // An empty PATCH body is rejected by the table store.
            return self.get_campaign(id).await;
        }
        let response = self
            .http
            .patch(self.table_url(CAMPAIGNS_TABLE))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .map_err(request_err)?;
        let rows: Vec<Campaign> = check(response).await?.json().await.map_err(request_err)?;
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn delete_campaign(&self, id: Uuid) -> TrackerResult<bool> {
        // The store does not cascade, so performance rows go first.
        let response = self
            .http
            .delete(self.table_url(PERFORMANCE_TABLE))
            .query(&[("campaign_id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(request_err)?;
        check(response).await?;

        let response = self
            .http
            .delete(self.table_url(CAMPAIGNS_TABLE))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(request_err)?;
        let rows: Vec<Campaign> = check(response).await?.json().await.map_err(request_err)?;
        let deleted = !rows.is_empty();
        debug!(campaign_id = %id, deleted, "Campaign delete completed");
        Ok(deleted)
    }

    async fn list_performance(
        &self,
        campaign_id: Uuid,
    ) -> TrackerResult<Vec<MonthlyPerformance>> {
        let campaign_filter = format!("eq.{campaign_id}");
        let response = self
            .http
            .get(self.table_url(PERFORMANCE_TABLE))
            .query(&[
                ("select", "*"),
                ("campaign_id", campaign_filter.as_str()),
                ("order", "month.asc"),
            ])
            .send()
            .await
            .map_err(request_err)?;
        check(response).await?.json().await.map_err(request_err)
    }

    async fn list_all_performance(&self) -> TrackerResult<Vec<MonthlyPerformance>> {
        let response = self
            .http
            .get(self.table_url(PERFORMANCE_TABLE))
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(request_err)?;
        check(response).await?.json().await.map_err(request_err)
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    async fn upsert_performance(
        &self,
        rows: Vec<PerformanceWrite>,
    ) -> TrackerResult<Vec<MonthlyPerformance>> {
        let response = self
            .http
            .post(self.table_url(PERFORMANCE_TABLE))
            .query(&[("on_conflict", "campaign_id,month")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&rows)
            .send()
            .await
            .map_err(request_err)?;
        check(response).await?.json().await.map_err(request_err)
    }

    async fn campaign_stat_rows(&self) -> TrackerResult<Vec<CampaignStatRow>> {
        let response = self
            .http
            .get(self.table_url(CAMPAIGNS_TABLE))
            .query(&[("select", "status,budget")])
            .send()
            .await
            .map_err(request_err)?;
        check(response).await?.json().await.map_err(request_err)
    }

    async fn performance_rois(&self) -> TrackerResult<Vec<f64>> {
        let response = self
            .http
            .get(self.table_url(PERFORMANCE_TABLE))
            .query(&[("select", "roi")])
            .send()
            .await
            .map_err(request_err)?;
        let rows: Vec<RoiRow> = check(response).await?.json().await.map_err(request_err)?;
        Ok(rows.into_iter().filter_map(|r| r.roi).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> StoreConfig {
        StoreConfig {
            url: url.to_string(),
            anon_key: "test-key".to_string(),
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(RestStore::new(&config("not a url")).is_err());
    }

    #[test]
    fn test_rejects_missing_key() {
        let mut cfg = config("http://localhost:54321");
        cfg.anon_key = String::new();
        assert!(RestStore::new(&cfg).is_err());
    }

    #[test]
    fn test_table_url_normalizes_trailing_slash() {
        let store = RestStore::new(&config("http://localhost:54321/")).unwrap();
        assert_eq!(
            store.table_url(CAMPAIGNS_TABLE),
            "http://localhost:54321/rest/v1/campaigns_campaign"
        );
    }
}
