//! Single-Sample Risk Prediction

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use metrics::{counter, histogram};
use risk_engine::{RiskAssessment, VitalsSample};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::metrics::{PREDICTIONS_TOTAL, REQUEST_DURATION_SECONDS};
use crate::AppState;

/// Validate and score one vitals sample
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<VitalsSample>, JsonRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let Json(vitals) = body?;
    let start = Instant::now();

    let assessment = state.service.risk().score_checked(&vitals)?;

    counter!(PREDICTIONS_TOTAL, "level" => assessment.level.as_str()).increment(1);
    histogram!(REQUEST_DURATION_SECONDS, "route" => "predict").record(start.elapsed().as_secs_f64());

    Ok(Json(assessment))
}
