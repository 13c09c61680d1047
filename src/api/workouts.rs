//! Completed workout endpoints

use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use super::AppState;
use super::device::DeviceId;
use super::error::{ApiError, ApiResult};
use super::types::CompletedWorkoutsResponse;
use super::validate::{DAY_ERROR, coerce_day, parse_day, parse_json_body};
use crate::db::CompletedWorkout;

/// GET /completed-workouts
pub async fn list_completed_workouts(
    State(state): State<AppState>,
    Extension(DeviceId(device_id)): Extension<DeviceId>,
) -> ApiResult<Json<CompletedWorkoutsResponse>> {
    let db = state.db.lock().await;
    let completed = db.get_completed_workouts(&device_id)?;
    Ok(Json(CompletedWorkoutsResponse { completed }))
}

/// POST /completed-workouts
///
/// Upsert: posting a day again only moves its `completed_at`.
pub async fn complete_workout(
    State(state): State<AppState>,
    Extension(DeviceId(device_id)): Extension<DeviceId>,
    body: Bytes,
) -> ApiResult<Json<CompletedWorkout>> {
    let body = parse_json_body(&body)?;
    let day = coerce_day(body.get("day"))?;
    let completed_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let db = state.db.lock().await;
    db.upsert_completed_workout(&device_id, day, &completed_at)?;
    debug!("Day {} completed for {}", day, device_id);

    Ok(Json(CompletedWorkout { day, completed_at }))
}

/// DELETE /completed-workouts/:day
///
/// Deleting a day that was never completed still succeeds.
pub async fn uncomplete_workout(
    State(state): State<AppState>,
    Extension(DeviceId(device_id)): Extension<DeviceId>,
    raw_day: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(raw_day) = raw_day.map_err(|e| {
        debug!("Rejected day segment: {}", e);
        ApiError::bad_request(DAY_ERROR)
    })?;
    let day = parse_day(&raw_day)?;

    let db = state.db.lock().await;
    let removed = db.delete_completed_workout(&device_id, day)?;
    debug!("Day {} uncompleted for {} (removed: {})", day, device_id, removed);

    Ok(StatusCode::NO_CONTENT)
}
