//! User registry handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use vitalink_core::user::{
    self,
    model::{HealthUpdate, NewUser, UserRecord},
};

use crate::{
    response::{ApiError, ApiResponse},
    state::AppState,
};

pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserRecord>>), ApiError> {
    let Json(input) = payload?;
    let record = user::register_user(state.store.as_ref(), input).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("User registered successfully.", record),
    ))
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserRecord>>>, ApiError> {
    let users = user::list_users(state.store.as_ref()).await?;
    Ok(ApiResponse::ok(format!("{} users found.", users.len()), users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    let record = user::get_user(state.store.as_ref(), &id).await?;
    Ok(ApiResponse::ok("User found.", record))
}

/// Merge the provided vitals into the user's stored health status.
pub async fn update_health_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<HealthUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    let Json(update) = payload?;
    let record = user::update_health_status(state.store.as_ref(), &id, update).await?;
    Ok(ApiResponse::ok("Health status updated successfully.", record))
}
