//! HTTP surface for telemetry aggregation

use axum::{
    extract::{rejection::JsonRejection, State},
    http::Method,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::{debug, error, info, warn};

use super::{
    models::{AggregationRequest, AggregationResponse},
    service::AggregationService,
};
use crate::config::ServerConfig;
use crate::error::{AggregatorError, ErrorCode, Result};

/// API server for the aggregation endpoint
pub struct TelemetryApiServer {
    service: Arc<AggregationService>,
    config: ServerConfig,
}

impl TelemetryApiServer {
    pub fn new(service: Arc<AggregationService>, config: ServerConfig) -> Self {
        Self { service, config }
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            AggregatorError::server(
                ErrorCode::SERVER_BIND_FAILED,
                format!("Failed to bind {}", addr),
            )
            .with_source(e)
        })?;

        info!("Starting telemetry API server on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                AggregatorError::server(ErrorCode::SERVER_IO, "Server terminated").with_source(e)
            })?;

        info!("Telemetry API server stopped");
        Ok(())
    }

    /// Build the API router
    pub fn router(&self) -> Router {
        let shared_state = Arc::new(ApiState {
            service: self.service.clone(),
        });

        Router::new()
            .route("/api", post(aggregate))
            .route("/health", get(health_check))
            .layer(cors_layer())
            .with_state(shared_state)
    }
}

/// Any origin and any request header, with credentials.
///
/// Wildcards cannot be combined with credentials, so origin and headers are
/// mirrored back from the request instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .max_age(std::time::Duration::from_secs(600))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Shared API state
#[derive(Clone)]
struct ApiState {
    service: Arc<AggregationService>,
}

/// Health check payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub records: usize,
    pub regions: usize,
}

// API Handlers

async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthStatus> {
    let store = state.service.store();
    Json(HealthStatus {
        status: "healthy".to_string(),
        records: store.len(),
        regions: store.regions().len(),
    })
}

async fn aggregate(
    State(state): State<Arc<ApiState>>,
    payload: std::result::Result<Json<AggregationRequest>, JsonRejection>,
) -> Result<Json<AggregationResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected aggregation request: {}", rejection.body_text());
        AggregatorError::from(rejection)
    })?;

    debug!(
        "Aggregating {} region(s) with threshold {}ms",
        request.regions.len(),
        request.threshold_ms
    );

    let response = state
        .service
        .aggregate(&request.regions, request.threshold_ms)
        .inspect_err(|e| error!("Aggregation failed: {}", e))?;

    Ok(Json(response))
}
