//! Sensor reading models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body a device posts to the ingress endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingInput {
    #[serde(rename = "heartRate")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "SpO2")]
    pub spo2: Option<f64>,
    pub weight: Option<f64>,
}

/// An accepted reading, stamped by the server and relayed to viewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(rename = "heartRate")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "SpO2")]
    pub spo2: Option<f64>,
    pub weight: Option<f64>,
    pub timestamp: String,
}

impl SensorReading {
    pub(crate) fn stamped(
        heart_rate: Option<f64>,
        spo2: Option<f64>,
        weight: Option<f64>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            heart_rate,
            spo2,
            weight,
            timestamp: at.to_rfc3339(),
        }
    }

    /// Whether the reading carries a heart-rate/SpO2 pair.
    pub fn has_pulse(&self) -> bool {
        self.heart_rate.is_some() && self.spo2.is_some()
    }
}
