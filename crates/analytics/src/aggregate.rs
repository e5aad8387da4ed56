//! Cross-campaign aggregation of monthly performance rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracker_core::types::MonthlyPerformance;

/// Totals for one calendar month across every campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub month: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
}

impl MonthlyTotals {
    fn zeroed(month: NaiveDate) -> Self {
        Self {
            month,
            impressions: 0,
            clicks: 0,
            conversions: 0,
            spend: 0.0,
            revenue: 0.0,
        }
    }
}

/// Group rows by month and sum every measure. Output is sorted by month
/// ascending regardless of input order.
pub fn aggregate_monthly(rows: &[MonthlyPerformance]) -> Vec<MonthlyTotals> {
    let mut by_month: BTreeMap<NaiveDate, MonthlyTotals> = BTreeMap::new();
    for row in rows {
        let totals = by_month
            .entry(row.month)
            .or_insert_with(|| MonthlyTotals::zeroed(row.month));
        totals.impressions += row.impressions;
        totals.clicks += row.clicks;
        totals.conversions += row.conversions;
        totals.spend += row.spend;
        totals.revenue += row.revenue;
    }
    by_month.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::roi::compute_roi;
    use uuid::Uuid;

    fn row(month: (i32, u32), spend: f64, revenue: f64, clicks: u64) -> MonthlyPerformance {
        MonthlyPerformance {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            month: NaiveDate::from_ymd_opt(month.0, month.1, 1).unwrap(),
            impressions: clicks * 10,
            clicks,
            conversions: clicks / 2,
            spend,
            revenue,
            roi: compute_roi(spend, revenue),
        }
    }

    #[test]
    fn test_aggregate_sums_across_campaigns() {
        let rows = vec![
            row((2026, 1), 100.0, 150.0, 40),
            row((2026, 1), 50.0, 30.0, 10),
            row((2026, 2), 80.0, 160.0, 20),
        ];
        let totals = aggregate_monthly(&rows);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].month, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert!((totals[0].spend - 150.0).abs() < f64::EPSILON);
        assert!((totals[0].revenue - 180.0).abs() < f64::EPSILON);
        assert_eq!(totals[0].clicks, 50);
        assert_eq!(totals[0].impressions, 500);
        assert!((totals[1].spend - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aggregate_orders_months_ascending() {
        let rows = vec![
            row((2026, 3), 10.0, 10.0, 1),
            row((2025, 12), 10.0, 10.0, 1),
            row((2026, 1), 10.0, 10.0, 1),
        ];
        let totals = aggregate_monthly(&rows);
        let months: Vec<NaiveDate> = totals.iter().map(|t| t.month).collect();
        assert_eq!(
            months,
            vec![
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn test_aggregate_empty_input() {
        assert!(aggregate_monthly(&[]).is_empty());
    }
}
