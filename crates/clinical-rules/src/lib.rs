//! Rule-Based Clinical Heuristics
//!
//! Deterministic threshold-band scoring of vital signs, plus descriptive
//! per-signal bands used to explain a risk assessment.

mod explain;
mod rules;

pub use explain::{
    BloodPressureBand, Contributions, HeartRateBand, RespiratoryBand, Spo2Band, TemperatureBand,
};
pub use rules::{RuleBreakdown, RuleEngine};
