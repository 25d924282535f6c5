//! ICU AI Service
//!
//! HTTP surface for patient risk scoring and bed recommendation. Both models
//! are trained before the listener is bound, so every request is served by a
//! fitted model.

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use risk_engine::ScoringService;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vitals_validator::Validator;

pub mod config;
pub mod error;
pub mod metrics;
mod routes;

pub use crate::config::{LoggingConfig, ServerConfig, ServiceConfig};
pub use crate::error::ApiError;

/// Name reported by the health endpoint
pub const SERVICE_NAME: &str = "icu-ai-service";

/// Application state shared across handlers.
///
/// Read-only after start-up, so handlers share it without locking.
pub struct AppState {
    /// Trained scoring engines
    pub service: ScoringService,
    /// Largest accepted batch
    pub max_batch_size: usize,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Prometheus handle, if a recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(service: ScoringService, max_batch_size: usize) -> Self {
        Self {
            service,
            max_batch_size,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            metrics: None,
        }
    }

    /// Expose `handle` at `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::health::metrics))
        .route("/predict", post(routes::predict::predict))
        .route("/recommend-bed", post(routes::bed::recommend_bed))
        .route("/batch-predict", post(routes::batch::batch_predict))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }
    Ok(())
}

/// Train the models, then serve until Ctrl-C
pub async fn run_server(config: ServiceConfig) -> anyhow::Result<()> {
    let handle = crate::metrics::install()?;

    let training = config.training.clone();
    let service = tokio::task::spawn_blocking(move || ScoringService::initialize(&training)).await??;
    let service = service.with_validator(Validator::new(config.validation.clone()));

    let state = AppState::new(service, config.server.max_batch_size).with_metrics(handle);
    let app = create_router(Arc::new(state));

    let addr = config.bind_address();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
