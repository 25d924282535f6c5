//! Threshold-Band Risk Rules

use feature_engine::VitalsSample;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound of the rule-based score
const MAX_RULE_SCORE: f64 = 1.0;

/// Per-signal increments produced by the rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleBreakdown {
    pub heart_rate: f64,
    pub spo2: f64,
    pub temperature: f64,
    pub blood_pressure: f64,
    pub respiratory_rate: f64,
}

impl RuleBreakdown {
    /// Sum of increments, clamped to 1.0
    pub fn total(&self) -> f64 {
        let sum = self.heart_rate + self.spo2 + self.temperature + self.blood_pressure + self.respiratory_rate;
        sum.min(MAX_RULE_SCORE)
    }
}

/// Additive rule engine over the five scored signals.
///
/// Each signal maps to a fixed increment through nested bands evaluated from
/// the most severe band down; the first matching band wins. Diastolic
/// pressure is not scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Create a new rule engine
    pub fn new() -> Self {
        Self
    }

    /// Per-signal increments for a sample
    pub fn evaluate(&self, vitals: &VitalsSample) -> RuleBreakdown {
        let breakdown = RuleBreakdown {
            heart_rate: Self::heart_rate_increment(vitals.heart_rate),
            spo2: Self::spo2_increment(vitals.spo2),
            temperature: Self::temperature_increment(vitals.temperature),
            blood_pressure: Self::blood_pressure_increment(vitals.blood_pressure_systolic),
            respiratory_rate: Self::respiratory_increment(vitals.respiratory_rate),
        };
        debug!("Rule breakdown: {:?}", breakdown);
        breakdown
    }

    /// Rule-based score in [0, 1]
    pub fn score(&self, vitals: &VitalsSample) -> f64 {
        self.evaluate(vitals).total()
    }

    pub fn heart_rate_increment(hr: f64) -> f64 {
        if hr > 120.0 {
            0.35
        } else if hr > 110.0 {
            0.25
        } else if hr > 100.0 {
            0.15
        } else if hr < 50.0 {
            0.30
        } else if hr < 60.0 {
            0.10
        } else {
            0.0
        }
    }

    pub fn spo2_increment(spo2: f64) -> f64 {
        if spo2 < 88.0 {
            0.45
        } else if spo2 < 92.0 {
            0.35
        } else if spo2 < 95.0 {
            0.15
        } else {
            0.0
        }
    }

    pub fn temperature_increment(temp: f64) -> f64 {
        if temp > 39.5 {
            0.35
        } else if temp > 38.5 {
            0.25
        } else if temp > 38.0 {
            0.10
        } else if temp < 35.0 {
            0.30
        } else {
            0.0
        }
    }

    /// Systolic pressure increment
    pub fn blood_pressure_increment(systolic: f64) -> f64 {
        if systolic > 180.0 || systolic < 90.0 {
            0.20
        } else if systolic > 160.0 || systolic < 100.0 {
            0.10
        } else {
            0.0
        }
    }

    pub fn respiratory_increment(rr: f64) -> f64 {
        if rr > 30.0 {
            0.20
        } else if rr > 25.0 {
            0.10
        } else if rr < 10.0 {
            0.20
        } else {
            0.0
        }
    }
}
