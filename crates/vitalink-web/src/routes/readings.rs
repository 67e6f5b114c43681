//! Device reading ingress.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;
use vitalink_core::reading::{self, model::ReadingInput, model::SensorReading};

use crate::{
    auth::DeviceKey,
    response::{ApiError, ApiResponse},
    state::AppState,
};

/// Accept a reading from a device and relay it to every connected viewer.
pub async fn ingest(
    _key: DeviceKey,
    State(state): State<AppState>,
    payload: Result<Json<ReadingInput>, JsonRejection>,
) -> Result<Json<ApiResponse<SensorReading>>, ApiError> {
    let Json(input) = payload?;
    let reading = reading::accept_reading(input)?;

    let viewers = state.broadcaster.publish(reading.clone());
    info!(viewers, timestamp = %reading.timestamp, "Reading accepted");

    Ok(ApiResponse::ok(reading::acknowledgement(&reading), reading))
}
