//! Shared handler state, error mapping and operational endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{debug, error, warn};
use tracker_analytics::PerformancePipeline;
use tracker_core::error::TrackerError;
use tracker_insights::NewsClient;
use tracker_store::CampaignStore;
use utoipa::ToSchema;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CampaignStore>,
    pub pipeline: Arc<PerformancePipeline>,
    pub news: Arc<NewsClient>,
    pub start_time: Instant,
}

/// Error payload for 4xx/5xx responses. `details` is only present for
/// upstream failures that carry a diagnostic body.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Boundary wrapper mapping domain errors onto HTTP responses. Validation
/// failures are 400, unknown resources 404 with an empty body, store and
/// upstream failures 500.
pub struct ApiError(TrackerError);

impl From<TrackerError> for ApiError {
    fn from(e: TrackerError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self.0 {
            TrackerError::Validation(message) => {
                warn!(error = %message, "Request validation failed");
                metrics::counter!("api.validation_errors").increment(1);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody {
                        error: message,
                        details: None,
                    }),
                )
                    .into_response()
            }
            TrackerError::NotFound(what) => {
                debug!(%what, "Resource not found");
                StatusCode::NOT_FOUND.into_response()
            }
            TrackerError::Upstream { message, details } => {
                error!(error = %message, "Upstream service failed");
                metrics::counter!("api.errors").increment(1);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: message,
                        details,
                    }),
                )
                    .into_response()
            }
            other => {
                error!(error = %other, "Request failed");
                metrics::counter!("api.errors").increment(1);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: other.to_string(),
                        details: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

/// GET / points API explorers at the interactive documentation.
pub async fn api_root() -> Redirect {
    Redirect::permanent("/docs")
}

/// GET /health reports process health.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready is the readiness probe for Kubernetes.
/// Returns 200 only when the service is ready to accept traffic.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Ready to accept traffic"),
        (status = 503, description = "Still starting up"),
    )
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.start_time.elapsed().as_secs() > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live is the liveness probe for Kubernetes.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses(
        (status = 200, description = "Process is alive"),
    )
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
