//! Bed Recommendation

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use metrics::{counter, histogram};
use risk_engine::{BedAttributes, BedRecommendation};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::metrics::{BED_RECOMMENDATIONS_TOTAL, REQUEST_DURATION_SECONDS};
use crate::AppState;

pub async fn recommend_bed(
    State(state): State<Arc<AppState>>,
    body: Result<Json<BedAttributes>, JsonRejection>,
) -> Result<Json<BedRecommendation>, ApiError> {
    let Json(attrs) = body?;
    let start = Instant::now();

    let recommendation = state.service.bed().recommend_checked(&attrs)?;

    counter!(BED_RECOMMENDATIONS_TOTAL, "room" => recommendation.recommended_room.as_str()).increment(1);
    histogram!(REQUEST_DURATION_SECONDS, "route" => "recommend-bed").record(start.elapsed().as_secs_f64());

    Ok(Json(recommendation))
}
