//! Prometheus Metrics

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const PREDICTIONS_TOTAL: &str = "icu_ai_predictions_total";
pub const BED_RECOMMENDATIONS_TOTAL: &str = "icu_ai_bed_recommendations_total";
pub const REJECTED_INPUTS_TOTAL: &str = "icu_ai_rejected_inputs_total";
pub const SCORING_ERRORS_TOTAL: &str = "icu_ai_scoring_errors_total";
pub const BATCH_SIZE: &str = "icu_ai_batch_size";
pub const REQUEST_DURATION_SECONDS: &str = "icu_ai_request_duration_seconds";

/// Install the global Prometheus recorder and register metric descriptions.
///
/// Only one recorder can be installed per process.
pub fn install() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(PREDICTIONS_TOTAL, "Risk assessments produced, by level");
    describe_counter!(BED_RECOMMENDATIONS_TOTAL, "Bed recommendations produced, by room");
    describe_counter!(REJECTED_INPUTS_TOTAL, "Inputs rejected by range validation");
    describe_counter!(SCORING_ERRORS_TOTAL, "Scoring computations that failed");
    describe_histogram!(BATCH_SIZE, "Samples per batch request");
    describe_histogram!(
        REQUEST_DURATION_SECONDS,
        Unit::Seconds,
        "Scoring request latency"
    );

    Ok(handle)
}
