//! Batch Risk Prediction

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use metrics::{counter, histogram};
use risk_engine::{BatchOutcome, VitalsSample};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::error::{record_failure, ApiError, MALFORMED_REQUEST};
use crate::metrics::{BATCH_SIZE, PREDICTIONS_TOTAL, REJECTED_INPUTS_TOTAL, REQUEST_DURATION_SECONDS};
use crate::AppState;

/// Score every sample independently; failures stay in their own slot.
///
/// Elements are decoded one at a time so a single malformed element is
/// reported in place instead of rejecting the whole body.
pub async fn batch_predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Vec<Value>>, JsonRejection>,
) -> Result<Json<Vec<BatchOutcome>>, ApiError> {
    let Json(elements) = body?;
    if elements.len() > state.max_batch_size {
        return Err(ApiError::BatchTooLarge {
            size: elements.len(),
            limit: state.max_batch_size,
        });
    }

    let start = Instant::now();
    histogram!(BATCH_SIZE).record(elements.len() as f64);

    let decoded: Vec<Result<VitalsSample, String>> = elements
        .into_iter()
        .map(|element| serde_json::from_value(element).map_err(|e| e.to_string()))
        .collect();
    let samples: Vec<VitalsSample> = decoded.iter().filter_map(|d| d.as_ref().ok().copied()).collect();

    let service = state.service.clone();
    let results = tokio::task::spawn_blocking(move || service.risk().batch_score(&samples))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut scored = results.into_iter();
    let outcomes: Vec<BatchOutcome> = decoded
        .into_iter()
        .map(|element| match element {
            Ok(_) => match scored.next() {
                Some(result) => {
                    match &result {
                        Ok(assessment) => {
                            counter!(PREDICTIONS_TOTAL, "level" => assessment.level.as_str()).increment(1)
                        }
                        Err(e) => record_failure(e),
                    }
                    BatchOutcome::from(result)
                }
                None => BatchOutcome::Failed {
                    kind: "internal_error",
                    detail: "missing batch result".to_string(),
                },
            },
            Err(detail) => {
                counter!(REJECTED_INPUTS_TOTAL).increment(1);
                BatchOutcome::Failed {
                    kind: MALFORMED_REQUEST,
                    detail,
                }
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!("Scored batch of {} samples ({} failed)", outcomes.len(), failed);
    histogram!(REQUEST_DURATION_SECONDS, "route" => "batch-predict").record(start.elapsed().as_secs_f64());

    Ok(Json(outcomes))
}
