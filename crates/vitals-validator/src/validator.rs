//! Range Validator for Patient Inputs

use crate::error::ValidationError;
use feature_engine::{BedAttributes, VitalsSample};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Validation configuration (inclusive bounds)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Heart rate valid range (bpm)
    pub heart_rate_range: (f64, f64),
    /// SpO2 valid range (%)
    pub spo2_range: (f64, f64),
    /// Temperature valid range (°C)
    pub temperature_range: (f64, f64),
    /// Systolic BP valid range (mmHg)
    pub systolic_range: (f64, f64),
    /// Diastolic BP valid range (mmHg)
    pub diastolic_range: (f64, f64),
    /// Respiratory rate valid range (breaths/min)
    pub respiratory_range: (f64, f64),
    /// Severity and risk score range
    pub unit_range: (f64, f64),
    /// Age valid range (years)
    pub age_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            heart_rate_range: (0.0, 300.0),
            spo2_range: (0.0, 100.0),
            temperature_range: (30.0, 45.0),
            systolic_range: (0.0, 300.0),
            diastolic_range: (0.0, 200.0),
            respiratory_range: (0.0, 60.0),
            unit_range: (0.0, 1.0),
            age_range: (0.0, 150.0),
        }
    }
}

/// Result of validating every field of an input
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    fn from_checks(checks: Vec<Result<(), ValidationError>>) -> Self {
        let fields_checked = checks.len();
        let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
        Self {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }

    /// First error, if any
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Boundary validator for vitals and bed attributes
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Check all six vital signs, collecting every failure
    pub fn check_vitals(&self, vitals: &VitalsSample) -> ValidationResult {
        let c = &self.config;
        ValidationResult::from_checks(vec![
            self.validate_range("heartRate", vitals.heart_rate, c.heart_rate_range),
            self.validate_range("spo2", vitals.spo2, c.spo2_range),
            self.validate_range("temperature", vitals.temperature, c.temperature_range),
            self.validate_range(
                "bloodPressureSystolic",
                vitals.blood_pressure_systolic,
                c.systolic_range,
            ),
            self.validate_range(
                "bloodPressureDiastolic",
                vitals.blood_pressure_diastolic,
                c.diastolic_range,
            ),
            self.validate_range("respiratoryRate", vitals.respiratory_rate, c.respiratory_range),
        ])
    }

    /// Validate vitals, failing on the first out-of-range field
    pub fn validate_vitals(&self, vitals: &VitalsSample) -> Result<(), ValidationError> {
        let result = self.check_vitals(vitals);
        if !result.valid {
            warn!("Rejected vitals sample: {} invalid field(s)", result.errors.len());
        }
        result.into_result()
    }

    /// Check all bed-recommendation attributes, collecting every failure
    pub fn check_bed_attributes(&self, attrs: &BedAttributes) -> ValidationResult {
        let c = &self.config;
        ValidationResult::from_checks(vec![
            self.validate_range("severity_score", attrs.severity_score, c.unit_range),
            self.validate_range("age", attrs.age, c.age_range),
            self.validate_range("risk_score", attrs.risk_score, c.unit_range),
        ])
    }

    /// Validate bed attributes, failing on the first out-of-range field
    pub fn validate_bed_attributes(&self, attrs: &BedAttributes) -> Result<(), ValidationError> {
        let result = self.check_bed_attributes(attrs);
        if !result.valid {
            warn!("Rejected bed attributes: {} invalid field(s)", result.errors.len());
        }
        result.into_result()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
