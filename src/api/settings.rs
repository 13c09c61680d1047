//! Training settings endpoints

use axum::{Extension, Json, body::Bytes, extract::State};
use tracing::info;

use super::AppState;
use super::device::DeviceId;
use super::error::ApiResult;
use super::types::{StartDateResponse, TrainingSettingsResponse};
use super::validate::{parse_json_body, parse_start_date};

/// GET /training-settings
///
/// A device without a row gets `startDate: null`; that is a device that
/// hasn't picked a start date yet, not an error.
pub async fn get_training_settings(
    State(state): State<AppState>,
    Extension(DeviceId(device_id)): Extension<DeviceId>,
) -> ApiResult<Json<TrainingSettingsResponse>> {
    let db = state.db.lock().await;
    let start_date = db.get_start_date(&device_id)?;
    Ok(Json(TrainingSettingsResponse { start_date }))
}

/// PUT /training-settings
pub async fn put_training_settings(
    State(state): State<AppState>,
    Extension(DeviceId(device_id)): Extension<DeviceId>,
    body: Bytes,
) -> ApiResult<Json<StartDateResponse>> {
    let body = parse_json_body(&body)?;
    let start_date = parse_start_date(body.get("startDate"))?
        .format("%Y-%m-%d")
        .to_string();

    let db = state.db.lock().await;
    db.upsert_start_date(&device_id, &start_date)?;
    info!("Start date for {} set to {}", device_id, start_date);

    Ok(Json(StartDateResponse { start_date }))
}
