//! Bearer-token check for device endpoints.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;
use vitalink_core::VitalError;

use crate::{response::ApiError, state::AppState};

/// Proof that the request carried the configured device key.
///
/// Put it before any body extractor so a bad credential is rejected before
/// the payload is looked at.
pub struct DeviceKey;

impl FromRequestParts<AppState> for DeviceKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            warn!("Rejected reading: missing bearer token");
            return Err(VitalError::unauthorized(
                "Unauthorized access. Missing or invalid Authorization header.",
            )
            .into());
        };

        if !constant_time_eq(token.as_bytes(), state.api_key.as_bytes()) {
            warn!("Rejected reading: invalid bearer token");
            return Err(VitalError::unauthorized("Unauthorized access. Invalid token.").into());
        }

        Ok(DeviceKey)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::constant_time_eq;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"secret-longer"));
        assert!(!constant_time_eq(b"", b"x"));
    }
}
