//! Device identity middleware
//!
//! Scoped routes read the caller's device id from `X-Device-Id`. The value is
//! opaque: only its presence is checked.

use axum::{extract::Request, middleware::Next, response::Response};

use super::error::ApiError;

pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// Device id of the current request, inserted by [`require_device_id`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceId(pub String);

/// Rejects requests without a non-empty device header before any handler runs
pub async fn require_device_id(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let device_id = request
        .headers()
        .get(DEVICE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or(ApiError::MissingDeviceId)?;

    request.extensions_mut().insert(DeviceId(device_id));
    Ok(next.run(request).await)
}
