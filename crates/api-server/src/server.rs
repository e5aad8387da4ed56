//! API server wiring: router construction and HTTP/metrics startup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracker_analytics::PerformancePipeline;
use tracker_core::config::AppConfig;
use tracker_insights::NewsClient;
use tracker_store::CampaignStore;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::rest::AppState;
use crate::{campaign_rest, dashboard_rest, insights_rest, rest, swagger};

/// Main API server for the HTTP surface and the metrics exporter.
pub struct ApiServer {
    config: AppConfig,
    store: Arc<dyn CampaignStore>,
    pipeline: Arc<PerformancePipeline>,
    news: Arc<NewsClient>,
}

/// Build the application router over the given state. Kept separate from
/// the server so tests can drive it without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Campaign CRUD
        .route(
            "/api/campaigns",
            get(campaign_rest::handle_list_campaigns).post(campaign_rest::handle_create_campaign),
        )
        .route(
            "/api/campaigns/:id",
            get(campaign_rest::handle_get_campaign)
                .put(campaign_rest::handle_replace_campaign)
                .patch(campaign_rest::handle_update_campaign)
                .delete(campaign_rest::handle_delete_campaign),
        )
        // Monthly performance
        .route(
            "/api/campaigns/:id/performance",
            get(campaign_rest::handle_list_performance)
                .put(campaign_rest::handle_upsert_performance),
        )
        // Dashboard
        .route(
            "/api/dashboard/stats",
            get(dashboard_rest::handle_dashboard_stats),
        )
        .route(
            "/api/dashboard/performance",
            get(dashboard_rest::handle_dashboard_performance),
        )
        // Insights
        .route("/api/insights/trends", get(insights_rest::handle_trends))
        .route("/api/news/search", get(insights_rest::handle_news_search))
        // Operational endpoints
        .route("/", get(rest::api_root))
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        // API docs
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", swagger::ApiDoc::openapi()))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl ApiServer {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CampaignStore>,
        pipeline: Arc<PerformancePipeline>,
        news: Arc<NewsClient>,
    ) -> Self {
        Self {
            config,
            store,
            pipeline,
            news,
        }
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let state = AppState {
            store: self.store.clone(),
            pipeline: self.pipeline.clone(),
            news: self.news.clone(),
            start_time: Instant::now(),
        };

        let app = router(state);

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics exporter on a separate port. Must run inside the
    /// Tokio runtime; the recorder is installed globally.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        Ok(())
    }
}
