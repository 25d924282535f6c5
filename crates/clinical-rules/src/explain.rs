//! Per-Signal Explanation Bands
//!
//! Human-readable bands for each vital sign. These are descriptive only and
//! never feed back into the risk score.

use feature_engine::VitalsSample;
use serde::{Deserialize, Serialize};

/// Heart rate band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeartRateBand {
    #[serde(rename = "Very High")]
    VeryHigh,
    Elevated,
    #[serde(rename = "Very Low")]
    VeryLow,
    Normal,
}

impl HeartRateBand {
    pub fn classify(hr: f64) -> Self {
        if hr > 120.0 {
            Self::VeryHigh
        } else if hr > 100.0 {
            Self::Elevated
        } else if hr < 50.0 {
            Self::VeryLow
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::Elevated => "Elevated",
            Self::VeryLow => "Very Low",
            Self::Normal => "Normal",
        }
    }
}

/// Oxygen saturation band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spo2Band {
    #[serde(rename = "Critically Low")]
    CriticallyLow,
    Low,
    #[serde(rename = "Below Normal")]
    BelowNormal,
    Normal,
}

impl Spo2Band {
    pub fn classify(spo2: f64) -> Self {
        if spo2 < 88.0 {
            Self::CriticallyLow
        } else if spo2 < 92.0 {
            Self::Low
        } else if spo2 < 95.0 {
            Self::BelowNormal
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CriticallyLow => "Critically Low",
            Self::Low => "Low",
            Self::BelowNormal => "Below Normal",
            Self::Normal => "Normal",
        }
    }
}

/// Body temperature band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureBand {
    #[serde(rename = "High Fever")]
    HighFever,
    Fever,
    Hypothermia,
    Normal,
}

impl TemperatureBand {
    pub fn classify(temp: f64) -> Self {
        if temp > 39.5 {
            Self::HighFever
        } else if temp > 38.5 {
            Self::Fever
        } else if temp < 35.0 {
            Self::Hypothermia
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighFever => "High Fever",
            Self::Fever => "Fever",
            Self::Hypothermia => "Hypothermia",
            Self::Normal => "Normal",
        }
    }
}

/// Systolic blood pressure band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodPressureBand {
    #[serde(rename = "Hypertensive Crisis")]
    HypertensiveCrisis,
    High,
    Hypotension,
    Normal,
}

impl BloodPressureBand {
    pub fn classify(systolic: f64) -> Self {
        if systolic > 180.0 {
            Self::HypertensiveCrisis
        } else if systolic > 160.0 {
            Self::High
        } else if systolic < 90.0 {
            Self::Hypotension
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HypertensiveCrisis => "Hypertensive Crisis",
            Self::High => "High",
            Self::Hypotension => "Hypotension",
            Self::Normal => "Normal",
        }
    }
}

/// Respiratory rate band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespiratoryBand {
    Tachypnea,
    Elevated,
    Bradypnea,
    Normal,
}

impl RespiratoryBand {
    pub fn classify(rr: f64) -> Self {
        if rr > 30.0 {
            Self::Tachypnea
        } else if rr > 25.0 {
            Self::Elevated
        } else if rr < 10.0 {
            Self::Bradypnea
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tachypnea => "Tachypnea",
            Self::Elevated => "Elevated",
            Self::Bradypnea => "Bradypnea",
            Self::Normal => "Normal",
        }
    }
}

/// Band label for every scored signal of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    pub heart_rate: HeartRateBand,
    pub spo2: Spo2Band,
    pub temperature: TemperatureBand,
    pub blood_pressure: BloodPressureBand,
    pub respiratory_rate: RespiratoryBand,
}

impl Contributions {
    /// Classify each signal of `vitals` independently
    pub fn explain(vitals: &VitalsSample) -> Self {
        Self {
            heart_rate: HeartRateBand::classify(vitals.heart_rate),
            spo2: Spo2Band::classify(vitals.spo2),
            temperature: TemperatureBand::classify(vitals.temperature),
            blood_pressure: BloodPressureBand::classify(vitals.blood_pressure_systolic),
            respiratory_rate: RespiratoryBand::classify(vitals.respiratory_rate),
        }
    }

    /// `(signal, label)` pairs in a fixed order
    pub fn labels(&self) -> [(&'static str, &'static str); 5] {
        [
            ("heart_rate", self.heart_rate.as_str()),
            ("spo2", self.spo2.as_str()),
            ("temperature", self.temperature.as_str()),
            ("blood_pressure", self.blood_pressure.as_str()),
            ("respiratory_rate", self.respiratory_rate.as_str()),
        ]
    }

    /// Whether every signal is in its normal band
    pub fn all_normal(&self) -> bool {
        self.labels().iter().all(|(_, label)| *label == "Normal")
    }
}
