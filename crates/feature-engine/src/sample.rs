//! Patient Samples and Feature Vectors

use serde::{Deserialize, Serialize};

/// Number of features in a vitals vector
pub const VITALS_FEATURE_DIMENSION: usize = 6;

/// Number of features in a bed-attribute vector
pub const BED_FEATURE_DIMENSION: usize = 5;

/// One set of vital-sign measurements for a patient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsSample {
    /// Heart rate (bpm)
    pub heart_rate: f64,
    /// Blood oxygen saturation (%)
    pub spo2: f64,
    /// Body temperature (°C)
    pub temperature: f64,
    /// Systolic blood pressure (mmHg)
    #[serde(default = "default_systolic")]
    pub blood_pressure_systolic: f64,
    /// Diastolic blood pressure (mmHg)
    #[serde(default = "default_diastolic")]
    pub blood_pressure_diastolic: f64,
    /// Respiratory rate (breaths/min)
    #[serde(default = "default_respiratory_rate")]
    pub respiratory_rate: f64,
}

fn default_systolic() -> f64 {
    120.0
}

fn default_diastolic() -> f64 {
    80.0
}

fn default_respiratory_rate() -> f64 {
    16.0
}

impl Default for VitalsSample {
    fn default() -> Self {
        Self {
            heart_rate: 75.0,
            spo2: 98.0,
            temperature: 36.8,
            blood_pressure_systolic: default_systolic(),
            blood_pressure_diastolic: default_diastolic(),
            respiratory_rate: default_respiratory_rate(),
        }
    }
}

impl VitalsSample {
    /// Create a sample from all six measurements
    pub fn new(
        heart_rate: f64,
        spo2: f64,
        temperature: f64,
        blood_pressure_systolic: f64,
        blood_pressure_diastolic: f64,
        respiratory_rate: f64,
    ) -> Self {
        Self {
            heart_rate,
            spo2,
            temperature,
            blood_pressure_systolic,
            blood_pressure_diastolic,
            respiratory_rate,
        }
    }

    /// Feature vector in model order:
    /// `[heart_rate, spo2, temperature, bp_systolic, bp_diastolic, respiratory_rate]`
    pub fn to_features(&self) -> [f64; VITALS_FEATURE_DIMENSION] {
        [
            self.heart_rate,
            self.spo2,
            self.temperature,
            self.blood_pressure_systolic,
            self.blood_pressure_diastolic,
            self.respiratory_rate,
        ]
    }
}

/// Patient attributes used for bed recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BedAttributes {
    /// Clinical severity (0.0 to 1.0)
    pub severity_score: f64,
    /// Patient requires mechanical ventilation
    #[serde(default)]
    pub needs_ventilator: bool,
    /// Patient requires an isolation room
    #[serde(default)]
    pub needs_isolation: bool,
    /// Age in years
    pub age: f64,
    /// Current risk score (0.0 to 1.0)
    pub risk_score: f64,
}

impl BedAttributes {
    /// Feature vector in model order:
    /// `[severity_score, needs_ventilator, needs_isolation, age, risk_score]`
    pub fn to_features(&self) -> [f64; BED_FEATURE_DIMENSION] {
        [
            self.severity_score,
            flag(self.needs_ventilator),
            flag(self.needs_isolation),
            self.age,
            self.risk_score,
        ]
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
