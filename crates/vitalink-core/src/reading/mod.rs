//! Sensor reading acceptance.
//!
//! A reading is accepted when it carries a weight, a heart-rate/SpO2 pair,
//! or both. Anything else is rejected before it reaches the broadcaster.

pub mod model;

use chrono::{DateTime, Utc};
use model::{ReadingInput, SensorReading};

use crate::error::{VitalError, VitalResult};

/// Validate a posted reading and stamp it with the current time.
pub fn accept_reading(input: ReadingInput) -> VitalResult<SensorReading> {
    accept_reading_at(input, Utc::now())
}

/// Validate a posted reading and stamp it with `at`.
///
/// Only complete groups survive: a heart rate without SpO2 (or the reverse)
/// is dropped, and if nothing is left the reading is rejected.
pub fn accept_reading_at(input: ReadingInput, at: DateTime<Utc>) -> VitalResult<SensorReading> {
    let heart_rate = input.heart_rate.filter(|v| v.is_finite());
    let spo2 = input.spo2.filter(|v| v.is_finite());
    let weight = input.weight.filter(|v| v.is_finite());

    let (heart_rate, spo2) = match (heart_rate, spo2) {
        (Some(hr), Some(o2)) => (Some(hr), Some(o2)),
        _ => (None, None),
    };

    if weight.is_none() && heart_rate.is_none() {
        return Err(VitalError::validation(
            "Invalid data. Please provide heart rate and SpO2, or weight.",
        ));
    }

    Ok(SensorReading::stamped(heart_rate, spo2, weight, at))
}

/// Human-readable acknowledgement for an accepted reading.
pub fn acknowledgement(reading: &SensorReading) -> &'static str {
    match (reading.has_pulse(), reading.weight.is_some()) {
        (true, true) => "Heart rate, SpO2 and weight received successfully.",
        (true, false) => "Heart rate and SpO2 received successfully.",
        _ => "Weight received successfully.",
    }
}
