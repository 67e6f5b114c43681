//! JSON response envelope and error mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use vitalink_core::VitalError;

/// Envelope wrapping every JSON body the API returns.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: Some(data),
        })
    }
}

/// Handler error. Internal failures are logged and reported generically.
#[derive(Debug)]
pub struct ApiError(pub VitalError);

impl From<VitalError> for ApiError {
    fn from(err: VitalError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(VitalError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            VitalError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            VitalError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            VitalError::UserNotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            VitalError::Store(e) => {
                error!(error = %e, "Request failed on store access");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };

        let body = ApiResponse::<()> {
            success: false,
            message,
            data: None,
        };
        (status, Json(body)).into_response()
    }
}
