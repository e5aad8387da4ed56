//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campaign Tracker API",
        version = "0.1.0",
        description = "Marketing campaign tracking backend.\n\nCampaign CRUD, monthly performance metrics with server-side ROI, dashboard aggregation, trend insights and news search.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Campaigns", description = "Campaign CRUD endpoints"),
        (name = "Performance", description = "Monthly performance rows and batch upsert"),
        (name = "Dashboard", description = "Aggregate statistics and chart series"),
        (name = "Insights", description = "Trend report and news search"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Campaigns
        crate::campaign_rest::handle_list_campaigns,
        crate::campaign_rest::handle_create_campaign,
        crate::campaign_rest::handle_get_campaign,
        crate::campaign_rest::handle_replace_campaign,
        crate::campaign_rest::handle_update_campaign,
        crate::campaign_rest::handle_delete_campaign,
        // Performance
        crate::campaign_rest::handle_list_performance,
        crate::campaign_rest::handle_upsert_performance,
        // Dashboard
        crate::dashboard_rest::handle_dashboard_stats,
        crate::dashboard_rest::handle_dashboard_performance,
        // Insights
        crate::insights_rest::handle_trends,
        crate::insights_rest::handle_news_search,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Campaign types
        tracker_core::types::Campaign,
        tracker_core::types::Platform,
        tracker_core::types::CampaignStatus,
        tracker_core::types::Goal,
        tracker_core::types::CreateCampaignRequest,
        tracker_core::types::UpdateCampaignRequest,
        // Performance types
        tracker_core::types::MonthlyPerformance,
        tracker_core::types::PerformanceRecord,
        // Dashboard types
        tracker_analytics::DashboardStats,
        crate::dashboard_rest::SeriesPoint,
        // Insights types
        tracker_insights::trends::TrendReport,
        tracker_insights::trends::InterestPoint,
        tracker_insights::trends::RelatedKeyword,
        tracker_insights::trends::TrendingTopic,
        tracker_insights::news::NewsSearchResponse,
        tracker_insights::news::NewsArticle,
        // REST error/health types
        crate::rest::ErrorBody,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
