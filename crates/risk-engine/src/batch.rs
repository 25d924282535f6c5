//! Per-Element Batch Outcome

use crate::risk::RiskAssessment;
use crate::ScoringError;
use serde::Serialize;

/// Result slot for one element of a batch.
///
/// Serializes as `{"status": "ok", ...assessment}` or
/// `{"status": "error", "kind": ..., "detail": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum BatchOutcome {
    #[serde(rename = "ok")]
    Scored(RiskAssessment),
    #[serde(rename = "error")]
    Failed { kind: &'static str, detail: String },
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchOutcome::Scored(_))
    }
}

impl From<Result<RiskAssessment, ScoringError>> for BatchOutcome {
    fn from(result: Result<RiskAssessment, ScoringError>) -> Self {
        match result {
            Ok(assessment) => BatchOutcome::Scored(assessment),
            Err(e) => BatchOutcome::Failed {
                kind: e.kind(),
                detail: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskLevel;
    use clinical_rules::Contributions;
    use feature_engine::VitalsSample;
    use vitals_validator::ValidationError;

    #[test]
    fn test_scored_flattens_assessment() {
        let assessment = RiskAssessment {
            risk_score: 0.2,
            level: RiskLevel::Low,
            rule_based_score: 0.0,
            ml_score: 0.5,
            contributions: Contributions::explain(&VitalsSample::default()),
        };
        let json = serde_json::to_value(BatchOutcome::from(Ok(assessment))).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["risk_score"], 0.2);
        assert_eq!(json["level"], "low");
    }

    #[test]
    fn test_failed_carries_kind() {
        let err = ScoringError::Validation(ValidationError::OutOfRange {
            field: "heartRate",
            value: 400.0,
            min: 0.0,
            max: 300.0,
        });
        let outcome = BatchOutcome::from(Err(err));
        assert!(!outcome.is_ok());

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "validation_error");
        assert!(json["detail"].as_str().unwrap().contains("heartRate"));
    }
}
