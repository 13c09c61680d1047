//! HTTP client for the training API

use anyhow::{Context, Result, bail};
use reqwest::{Method, RequestBuilder, Response, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::api::DEVICE_ID_HEADER;
use crate::api::types::{
    CompleteWorkoutRequest, CompletedWorkoutsResponse, HealthResponse, StartDateRequest,
    StartDateResponse, TrainingSettingsResponse,
};
use crate::db::CompletedWorkout;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a route onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, device_id: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");
        match device_id {
            Some(id) => builder.header(DEVICE_ID_HEADER, id),
            None => builder,
        }
    }

    /// Send and turn non-2xx statuses into errors carrying the response body
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.context("API request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            bail!("API request failed ({}): {}", status.as_u16(), detail);
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        response.json::<T>().await.context("decoding API response")
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.send_json(self.request(Method::GET, "health", None)).await
    }

    pub async fn fetch_training_settings(&self, device_id: &str) -> Result<TrainingSettingsResponse> {
        self.send_json(self.request(Method::GET, "training-settings", Some(device_id)))
            .await
    }

    pub async fn save_start_date(&self, device_id: &str, start_date: &str) -> Result<StartDateResponse> {
        let body = StartDateRequest {
            start_date: start_date.to_string(),
        };
        self.send_json(
            self.request(Method::PUT, "training-settings", Some(device_id))
                .json(&body),
        )
        .await
    }

    pub async fn fetch_completed_workouts(&self, device_id: &str) -> Result<CompletedWorkoutsResponse> {
        self.send_json(self.request(Method::GET, "completed-workouts", Some(device_id)))
            .await
    }

    pub async fn add_completed_workout(&self, device_id: &str, day: i64) -> Result<CompletedWorkout> {
        self.send_json(
            self.request(Method::POST, "completed-workouts", Some(device_id))
                .json(&CompleteWorkoutRequest { day }),
        )
        .await
    }

    /// Expects `204 No Content`
    pub async fn remove_completed_workout(&self, device_id: &str, day: i64) -> Result<()> {
        let path = format!("completed-workouts/{}", day);
        self.send(self.request(Method::DELETE, &path, Some(device_id)))
            .await?;
        Ok(())
    }
}
