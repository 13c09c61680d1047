//! Request/response bodies shared by the server handlers and the client

use serde::{Deserialize, Serialize};

use crate::db::CompletedWorkout;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSettingsResponse {
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDateRequest {
    pub start_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDateResponse {
    pub start_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedWorkoutsResponse {
    pub completed: Vec<CompletedWorkout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteWorkoutRequest {
    pub day: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
