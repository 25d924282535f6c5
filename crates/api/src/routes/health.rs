//! Health and Metrics Routes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: String,
    pub models_loaded: bool,
    pub risk_predictor_trained: bool,
    pub bed_recommender_trained: bool,
    pub uptime_seconds: u64,
}

/// Readiness and model status
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let service = &state.service;
    Json(HealthResponse {
        status: "ok",
        service: crate::SERVICE_NAME,
        version: state.version.clone(),
        models_loaded: service.is_ready(),
        risk_predictor_trained: service.risk().is_trained(),
        bed_recommender_trained: service.bed().is_trained(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Prometheus text exposition
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics exporter not installed".to_string()),
    }
}
