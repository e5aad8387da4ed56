//! Validation and normalization for monthly performance batches.
//!
//! The pipeline is the only write path for performance rows. It accepts the
//! raw request body, rejects anything that is not a list, normalizes each
//! record, recomputes ROI, and hands the whole batch to the store as one
//! upsert. The first invalid record rejects the batch before any write.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use tracing::info;
use tracker_core::error::{TrackerError, TrackerResult};
use tracker_core::roi::compute_roi;
use tracker_core::types::{MonthlyPerformance, PerformanceRecord, PerformanceWrite};
use tracker_store::CampaignStore;
use uuid::Uuid;

pub struct PerformancePipeline {
    store: Arc<dyn CampaignStore>,
}

impl PerformancePipeline {
    pub fn new(store: Arc<dyn CampaignStore>) -> Self {
        Self { store }
    }

    /// Validate, normalize and persist the monthly records for one campaign.
    /// Returns the store's materialized rows.
    pub async fn upsert_monthly(
        &self,
        campaign_id: Uuid,
        body: Value,
    ) -> TrackerResult<Vec<MonthlyPerformance>> {
        let start = std::time::Instant::now();
        metrics::counter!("performance.upsert_batches").increment(1);

        let writes = match validate_batch(campaign_id, body) {
            Ok(writes) => writes,
            Err(e) => {
                metrics::counter!("performance.rejected_batches").increment(1);
                return Err(e);
            }
        };

        info!(
            campaign_id = %campaign_id,
            records = writes.len(),
            "Upserting monthly performance batch"
        );
        let rows = self.store.upsert_performance(writes).await?;

        metrics::counter!("performance.rows_upserted").increment(rows.len() as u64);
        metrics::histogram!("performance.upsert_latency_us")
            .record(start.elapsed().as_micros() as f64);
        Ok(rows)
    }
}

/// Turn the raw request body into normalized writes, or the first
/// validation failure. Nothing is persisted until the whole batch passes.
fn validate_batch(campaign_id: Uuid, body: Value) -> TrackerResult<Vec<PerformanceWrite>> {
    let records = match body {
        Value::Array(records) => records,
        _ => {
            return Err(TrackerError::Validation(
                "expected a list of performance records".to_string(),
            ))
        }
    };

    let mut writes = Vec::with_capacity(records.len());
    let mut seen_months: HashSet<NaiveDate> = HashSet::new();
    let mut seen_ids: HashSet<Uuid> = HashSet::new();

    for (index, record) in records.into_iter().enumerate() {
        let record: PerformanceRecord = serde_json::from_value(record)
            .map_err(|e| TrackerError::Validation(format!("records[{index}]: {e}")))?;
        let write = normalize(campaign_id, &record).map_err(|e| at_index(index, e))?;
        if !seen_months.insert(write.month) {
            return Err(TrackerError::Validation(format!(
                "records[{index}]: duplicate month {}",
                write.month
            )));
        }
        if let Some(id) = write.id {
            if !seen_ids.insert(id) {
                return Err(TrackerError::Validation(format!(
                    "records[{index}]: duplicate id {id}"
                )));
            }
        }
        writes.push(write);
    }
    Ok(writes)
}

/// Parse a month key, accepting `YYYY-MM` or a full `YYYY-MM-DD` date, and
/// normalize it to the first day of its month.
pub fn parse_month(raw: &str) -> TrackerResult<NaiveDate> {
    let trimmed = raw.trim();
    let date = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").map_err(
            |_| {
                TrackerError::Validation(format!(
                    "invalid month {raw:?}, expected YYYY-MM or YYYY-MM-DD"
                ))
            },
        )?,
    };
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .ok_or_else(|| TrackerError::Validation(format!("invalid month {raw:?}")))
}

fn normalize(campaign_id: Uuid, record: &PerformanceRecord) -> TrackerResult<PerformanceWrite> {
    let month = parse_month(&record.month)?;
    if record.spend < 0.0 {
        return Err(TrackerError::Validation(format!(
            "spend must be non-negative, got {}",
            record.spend
        )));
    }
    if record.revenue < 0.0 {
        return Err(TrackerError::Validation(format!(
            "revenue must be non-negative, got {}",
            record.revenue
        )));
    }
    Ok(PerformanceWrite {
        id: record.id,
        campaign_id,
        month,
        impressions: record.impressions,
        clicks: record.clicks,
        conversions: record.conversions,
        spend: record.spend,
        revenue: record.revenue,
        roi: compute_roi(record.spend, record.revenue),
    })
}

fn at_index(index: usize, e: TrackerError) -> TrackerError {
    match e {
        TrackerError::Validation(msg) => {
            TrackerError::Validation(format!("records[{index}]: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracker_core::types::{CampaignStatus, CreateCampaignRequest, Goal, Platform};
    use tracker_store::MemoryStore;

    async fn pipeline_with_campaign() -> (PerformancePipeline, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let campaign = tracker_core::types::Campaign::new(CreateCampaignRequest {
            name: "Pipeline Test".to_string(),
            description: None,
            platform: Platform::GoogleAds,
            status: CampaignStatus::Active,
            budget: 1_000.0,
            amount_spent: 0.0,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            target_audience: None,
            goal: Goal::Sales,
            roi: None,
        });
        let id = campaign.id;
        store.insert_campaign(campaign).await.unwrap();
        (PerformancePipeline::new(store), id)
    }

    #[test]
    fn test_parse_month_short_form() {
        assert_eq!(
            parse_month("2026-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_month_full_date_normalizes_to_first() {
        assert_eq!(
            parse_month("2026-03-17").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_month_rejects_garbage() {
        assert!(parse_month("March 2026").is_err());
        assert!(parse_month("2026-13").is_err());
        assert!(parse_month("").is_err());
    }

    #[tokio::test]
    async fn test_rejects_non_array_body() {
        let (pipeline, id) = pipeline_with_campaign().await;
        let err = pipeline
            .upsert_monthly(id, json!({"month": "2026-01"}))
            .await
            .unwrap_err();
        match err {
            TrackerError::Validation(msg) => assert!(msg.contains("expected a list")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_counters_default_to_zero() {
        let (pipeline, id) = pipeline_with_campaign().await;
        let rows = pipeline
            .upsert_monthly(id, json!([{"month": "2026-01", "spend": 100.0, "revenue": 150.0}]))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].impressions, 0);
        assert_eq!(rows[0].clicks, 0);
        assert_eq!(rows[0].conversions, 0);
    }

    #[tokio::test]
    async fn test_roi_is_recomputed_not_trusted() {
        let (pipeline, id) = pipeline_with_campaign().await;
        let rows = pipeline
            .upsert_monthly(
                id,
                json!([{"month": "2026-01", "spend": 100.0, "revenue": 150.0, "roi": 999.0}]),
            )
            .await
            .unwrap();
        assert!((rows[0].roi - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_zero_spend_month_gets_zero_roi() {
        let (pipeline, id) = pipeline_with_campaign().await;
        let rows = pipeline
            .upsert_monthly(
                id,
                json!([
                    {"month": "2026-01", "spend": 100.0, "revenue": 150.0},
                    {"month": "2026-02", "spend": 0.0, "revenue": 50.0},
                ]),
            )
            .await
            .unwrap();
        assert!((rows[0].roi - 50.0).abs() < f64::EPSILON);
        assert!(rows[1].roi.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_rejects_negative_spend_with_index() {
        let (pipeline, id) = pipeline_with_campaign().await;
        let err = pipeline
            .upsert_monthly(
                id,
                json!([
                    {"month": "2026-01", "spend": 10.0},
                    {"month": "2026-02", "spend": -4.0},
                ]),
            )
            .await
            .unwrap_err();
        match err {
            TrackerError::Validation(msg) => {
                assert!(msg.contains("records[1]"));
                assert!(msg.contains("spend"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_rejects_duplicate_id_in_batch() {
        let (pipeline, id) = pipeline_with_campaign().await;
        let row_id = Uuid::new_v4();
        let err = pipeline
            .upsert_monthly(
                id,
                json!([
                    {"id": row_id, "month": "2026-01", "spend": 10.0},
                    {"id": row_id, "month": "2026-02", "spend": 20.0},
                ]),
            )
            .await
            .unwrap_err();
        match err {
            TrackerError::Validation(msg) => assert!(msg.contains("duplicate id")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_rejects_duplicate_month_in_batch() {
        let (pipeline, id) = pipeline_with_campaign().await;
        let err = pipeline
            .upsert_monthly(
                id,
                json!([
                    {"month": "2026-01", "spend": 10.0},
                    {"month": "2026-01-20", "spend": 20.0},
                ]),
            )
            .await
            .unwrap_err();
        match err {
            TrackerError::Validation(msg) => assert!(msg.contains("duplicate month")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_upsert_overwrites_by_natural_key() {
        let (pipeline, id) = pipeline_with_campaign().await;
        pipeline
            .upsert_monthly(id, json!([{"month": "2026-01", "spend": 100.0, "revenue": 110.0}]))
            .await
            .unwrap();
        let rows = pipeline
            .upsert_monthly(id, json!([{"month": "2026-01", "spend": 100.0, "revenue": 200.0}]))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].revenue - 200.0).abs() < f64::EPSILON);
        assert!((rows[0].roi - 100.0).abs() < f64::EPSILON);
    }
}
