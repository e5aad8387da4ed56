//! Trend insights backed by fixture data.
//!
//! The report mimics a market-analysis feed. Everything except the related
//! keywords is static demo data; swap this module for a real trends provider
//! without touching the HTTP surface.

use serde::Serialize;
use utoipa::ToSchema;

/// Query used when the caller does not supply one.
pub const DEFAULT_QUERY: &str = "digital marketing";

const INTEREST_BY_MONTH: [(&str, u32); 12] = [
    ("Jan", 45),
    ("Feb", 52),
    ("Mar", 38),
    ("Apr", 65),
    ("May", 78),
    ("Jun", 90),
    ("Jul", 85),
    ("Aug", 70),
    ("Sep", 75),
    ("Oct", 82),
    ("Nov", 95),
    ("Dec", 88),
];

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrendReport {
    pub trend_score: u32,
    pub search_volume: String,
    pub competition: String,
    pub interest_over_time: Vec<InterestPoint>,
    pub related_keywords: Vec<RelatedKeyword>,
    pub trending_topics: Vec<TrendingTopic>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InterestPoint {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RelatedKeyword {
    pub name: String,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrendingTopic {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub score: u32,
    pub volume: String,
}

/// Build the fixture report for a search query.
pub fn trend_report(query: &str) -> TrendReport {
    TrendReport {
        trend_score: 87,
        search_volume: "2.4M/month".to_string(),
        competition: "Medium".to_string(),
        interest_over_time: INTEREST_BY_MONTH
            .iter()
            .map(|(name, value)| InterestPoint {
                name: (*name).to_string(),
                value: *value,
            })
            .collect(),
        related_keywords: vec![
            RelatedKeyword {
                name: format!("{query} trends"),
                volume: 8_500,
            },
            RelatedKeyword {
                name: format!("ai in {query}"),
                volume: 7_200,
            },
            RelatedKeyword {
                name: "marketing strategies".to_string(),
                volume: 5_400,
            },
        ],
        trending_topics: vec![
            TrendingTopic {
                id: 1,
                name: "AI Content Generation".to_string(),
                category: "Technology".to_string(),
                score: 92,
                volume: "1.2M".to_string(),
            },
            TrendingTopic {
                id: 2,
                name: "Short-form Video".to_string(),
                category: "Social Media".to_string(),
                score: 88,
                volume: "950K".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_interpolates_query_into_keywords() {
        let report = trend_report("email outreach");
        assert_eq!(report.related_keywords[0].name, "email outreach trends");
        assert_eq!(report.related_keywords[1].name, "ai in email outreach");
        assert_eq!(report.related_keywords[2].name, "marketing strategies");
    }

    #[test]
    fn test_interest_series_covers_twelve_months() {
        let report = trend_report(DEFAULT_QUERY);
        assert_eq!(report.interest_over_time.len(), 12);
        assert_eq!(report.interest_over_time[0].name, "Jan");
        assert_eq!(report.interest_over_time[11].name, "Dec");
        assert_eq!(report.interest_over_time[10].value, 95);
    }

    #[test]
    fn test_report_headline_values() {
        let report = trend_report(DEFAULT_QUERY);
        assert_eq!(report.trend_score, 87);
        assert_eq!(report.search_volume, "2.4M/month");
        assert_eq!(report.competition, "Medium");
        assert_eq!(report.trending_topics.len(), 2);
        assert_eq!(report.trending_topics[0].name, "AI Content Generation");
    }
}
