//! HTTP Error Mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics::counter;
use risk_engine::ScoringError;
use serde::Serialize;
use thiserror::Error;

use crate::metrics::{REJECTED_INPUTS_TOTAL, SCORING_ERRORS_TOTAL};

/// Errors surfaced by the route handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    /// Body could not be parsed into the expected shape
    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),

    #[error("Batch of {size} samples exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Scoring(ScoringError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Scoring(ScoringError::Computation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MalformedBody(rejection) => rejection.status(),
            ApiError::BatchTooLarge { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Scoring(e) => e.kind(),
            ApiError::MalformedBody(_) => MALFORMED_REQUEST,
            ApiError::BatchTooLarge { .. } => "batch_too_large",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

/// Error kind for bodies (or batch elements) that do not deserialize
pub(crate) const MALFORMED_REQUEST: &str = "malformed_request";

/// Count a scoring failure under the matching metric
pub(crate) fn record_failure(error: &ScoringError) {
    match error {
        ScoringError::Validation(_) => counter!(REJECTED_INPUTS_TOTAL).increment(1),
        ScoringError::Computation(_) => counter!(SCORING_ERRORS_TOTAL).increment(1),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Scoring(e) = &self {
            record_failure(e);
        }
        if self.status().is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let field = match &self {
            ApiError::Scoring(ScoringError::Validation(e)) => Some(e.field()),
            _ => None,
        };
        let body = ErrorBody {
            kind: self.kind(),
            detail: self.to_string(),
            field,
        };
        (self.status(), Json(body)).into_response()
    }
}
