//! Deterministic demo dataset for the in-memory backend.
//!
//! Fixture data only. Nothing here is reachable from the REST-backed
//! production path, and the aggregation and ROI logic never depend on it;
//! per-row ROI is derived with the same [`compute_roi`] used for real writes.

use chrono::{Datelike, Duration, Months, NaiveDate, Utc};
use tracker_core::roi::compute_roi;
use tracker_core::types::{Campaign, CampaignStatus, Goal, MonthlyPerformance, Platform};
use uuid::Uuid;

/// `(spend, revenue, impressions, clicks, conversions)` for one month.
type MonthSeed = (f64, f64, u64, u64, u64);

/// Campaigns plus their performance rows, ready for insertion. Month keys
/// run backwards from last month so dashboards show a recent series.
pub fn dataset() -> (Vec<Campaign>, Vec<MonthlyPerformance>) {
    let now = Utc::now();
    let today = now.date_naive();

    let seeds: Vec<(
        &str,
        Platform,
        CampaignStatus,
        Goal,
        f64,
        Option<&str>,
        &[MonthSeed],
    )> = vec![
        (
            "Spring Sale Search Ads",
            Platform::GoogleAds,
            CampaignStatus::Active,
            Goal::Sales,
            42_000.0,
            Some("Returning customers, US and CA"),
            &[
                (8_200.0, 11_480.0, 260_000, 7_800, 290),
                (9_100.0, 13_650.0, 291_000, 8_700, 330),
                (9_800.0, 15_680.0, 315_000, 9_450, 370),
                (10_400.0, 17_680.0, 338_000, 10_100, 415),
            ],
        ),
        (
            "Summer Brand Lift",
            Platform::Instagram,
            CampaignStatus::Active,
            Goal::BrandAwareness,
            18_000.0,
            None,
            &[
                (3_900.0, 2_950.0, 540_000, 16_200, 120),
                (4_200.0, 4_850.0, 575_000, 17_800, 150),
                (4_600.0, 6_120.0, 610_000, 19_500, 185),
            ],
        ),
        (
            "Newsletter Reactivation",
            Platform::Email,
            CampaignStatus::Active,
            Goal::Engagement,
            6_500.0,
            Some("Subscribers dormant for 90+ days"),
            &[
                (950.0, 2_280.0, 48_000, 3_360, 260),
                (980.0, 2_450.0, 51_000, 3_570, 275),
                (1_020.0, 2_750.0, 54_000, 3_780, 300),
                (1_100.0, 3_080.0, 58_000, 4_060, 330),
            ],
        ),
        (
            "B2B Lead Engine",
            Platform::LinkedIn,
            CampaignStatus::Paused,
            Goal::LeadGeneration,
            55_000.0,
            Some("IT decision makers, 200+ seat companies"),
            &[
                (12_500.0, 15_000.0, 88_000, 2_640, 210),
                (13_200.0, 17_160.0, 92_000, 2_760, 230),
            ],
        ),
        (
            "Holiday Gift Guide",
            Platform::Facebook,
            CampaignStatus::Completed,
            Goal::Sales,
            24_000.0,
            None,
            &[
                (7_800.0, 14_040.0, 420_000, 14_700, 880),
                (8_300.0, 15_770.0, 445_000, 15_575, 940),
                (7_900.0, 13_430.0, 430_000, 15_050, 860),
            ],
        ),
        (
            "Product Launch Teaser",
            Platform::GoogleAds,
            CampaignStatus::Draft,
            Goal::Traffic,
            30_000.0,
            None,
            &[],
        ),
    ];

    let mut campaigns = Vec::with_capacity(seeds.len());
    let mut rows = Vec::new();

    for (i, (name, platform, status, goal, budget, audience, months)) in
        seeds.into_iter().enumerate()
    {
        let id = Uuid::new_v4();
        let total_spend: f64 = months.iter().map(|m| m.0).sum();
        let total_revenue: f64 = months.iter().map(|m| m.1).sum();

        campaigns.push(Campaign {
            id,
            name: name.to_string(),
            description: None,
            platform,
            status,
            budget,
            amount_spent: total_spend,
            start_date: if months.is_empty() {
                today
            } else {
                month_start(today, months.len() as u32)
            },
            end_date: today + Duration::days(60),
            target_audience: audience.map(str::to_string),
            goal,
            roi: if months.is_empty() {
                None
            } else {
                Some(compute_roi(total_spend, total_revenue))
            },
            created_at: now - Duration::days(140 - (i as i64) * 14),
        });

        for (j, (spend, revenue, impressions, clicks, conversions)) in
            months.iter().copied().enumerate()
        {
            rows.push(MonthlyPerformance {
                id: Uuid::new_v4(),
                campaign_id: id,
                month: month_start(today, (months.len() - j) as u32),
                impressions,
                clicks,
                conversions,
                spend,
                revenue,
                roi: compute_roi(spend, revenue),
            });
        }
    }

    (campaigns, rows)
}

/// First day of the month `months_back` whole months before `today`.
fn month_start(today: NaiveDate, months_back: u32) -> NaiveDate {
    let shifted = today
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(today);
    NaiveDate::from_ymd_opt(shifted.year(), shifted.month(), 1).unwrap_or(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dataset_is_internally_consistent() {
        let (campaigns, rows) = dataset();
        let ids: HashSet<_> = campaigns.iter().map(|c| c.id).collect();

        assert!(!campaigns.is_empty());
        for row in &rows {
            assert!(ids.contains(&row.campaign_id));
            assert_eq!(row.month.day(), 1);
            assert!((row.roi - compute_roi(row.spend, row.revenue)).abs() < f64::EPSILON);
        }

        let keys: HashSet<_> = rows.iter().map(|r| (r.campaign_id, r.month)).collect();
        assert_eq!(keys.len(), rows.len());
    }

    #[test]
    fn test_dataset_covers_all_statuses() {
        let (campaigns, _) = dataset();
        for status in [
            CampaignStatus::Active,
            CampaignStatus::Paused,
            CampaignStatus::Completed,
            CampaignStatus::Draft,
        ] {
            assert!(campaigns.iter().any(|c| c.status == status));
        }
    }
}
