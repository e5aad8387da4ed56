//! Campaign Tracker, a backend for marketing campaign tracking.
//!
//! Main entry point that wires the store, analytics pipeline and news client
//! into the API server.

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracker_analytics::PerformancePipeline;
use tracker_api::ApiServer;
use tracker_core::config::{AppConfig, StoreBackend};
use tracker_insights::NewsClient;
use tracker_store::{CampaignStore, MemoryStore, RestStore};

#[derive(Parser, Debug)]
#[command(name = "campaign-tracker")]
#[command(about = "Marketing campaign tracking backend")]
#[command(version)]
struct Cli {
    /// HTTP port (overrides config)
    #[arg(long, env = "CAMPAIGN_TRACKER__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Store backend: 'rest' or 'memory' (overrides config)
    #[arg(long, env = "CAMPAIGN_TRACKER__STORE__BACKEND")]
    store_backend: Option<String>,

    /// Use the in-memory store seeded with demo campaigns
    #[arg(long, default_value_t = false)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Campaign Tracker starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(backend) = cli.store_backend {
        config.store.backend = match backend.as_str() {
            "rest" => StoreBackend::Rest,
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("unknown store backend {other:?}, expected 'rest' or 'memory'"),
        };
    }
    if cli.demo {
        config.store.backend = StoreBackend::Memory;
    }

    info!(
        backend = ?config.store.backend,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        demo = cli.demo,
        "Configuration loaded"
    );

    // Build the store client once; handlers share it.
    let store: Arc<dyn CampaignStore> = match config.store.backend {
        StoreBackend::Rest => Arc::new(RestStore::new(&config.store)?),
        StoreBackend::Memory => {
            if cli.demo {
                Arc::new(MemoryStore::with_demo_data())
            } else {
                Arc::new(MemoryStore::new())
            }
        }
    };

    let pipeline = Arc::new(PerformancePipeline::new(store.clone()));
    let news = Arc::new(NewsClient::new(&config.news)?);

    let api_server = ApiServer::new(config.clone(), store, pipeline, news);

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Campaign Tracker is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
