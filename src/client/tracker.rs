//! Client-side training state
//!
//! Holds the start date and the completed-day set for one device, refreshes
//! them from the API, and derives streak and weekly stats. Mutators commit to
//! local state only after the server acknowledged the change; failures are
//! logged and leave local state as it was.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use super::api::ApiClient;
use super::device::DeviceIdStore;
use crate::progress::{self, WeeklyStat};

pub struct TrainingTracker {
    client: ApiClient,
    device_id: String,
    start_date: Option<NaiveDate>,
    completed: BTreeSet<i64>,
    loading: bool,
}

impl TrainingTracker {
    pub fn new(client: ApiClient, device_id: impl Into<String>) -> Self {
        Self {
            client,
            device_id: device_id.into(),
            start_date: None,
            completed: BTreeSet::new(),
            loading: true,
        }
    }

    /// Tracker for the device id stored in `store` (created if missing)
    pub fn with_store(client: ApiClient, store: &DeviceIdStore) -> Result<Self> {
        let device_id = store.load_or_create()?;
        Ok(Self::new(client, device_id))
    }

    /// Fetch settings and completions concurrently.
    ///
    /// Either fetch may fail on its own; a failed fetch is logged and its
    /// part of the state is kept as it was.
    pub async fn load(&mut self) {
        let (settings, completed) = tokio::join!(
            self.client.fetch_training_settings(&self.device_id),
            self.client.fetch_completed_workouts(&self.device_id),
        );

        match settings.and_then(|s| s.start_date.as_deref().map(parse_date).transpose()) {
            Ok(start_date) => self.start_date = start_date,
            Err(e) => warn!("Failed to load training settings: {:#}", e),
        }

        match completed {
            Ok(response) => {
                self.completed = response.completed.into_iter().map(|w| w.day).collect();
            }
            Err(e) => warn!("Failed to load completed workouts: {:#}", e),
        }

        self.loading = false;
    }

    /// Save the start date. Returns whether the server accepted it.
    pub async fn set_start_date(&mut self, date: NaiveDate) -> bool {
        let date_str = date.format("%Y-%m-%d").to_string();
        match self.client.save_start_date(&self.device_id, &date_str).await {
            Ok(_) => {
                self.start_date = Some(date);
                true
            }
            Err(e) => {
                warn!("Failed to save start date: {:#}", e);
                false
            }
        }
    }

    /// Flip a day between completed and not completed.
    ///
    /// Direction comes from the local set at call time, so two sessions
    /// toggling the same day can race; the store keeps the last write.
    /// Returns whether the server acknowledged the change.
    pub async fn toggle_workout_complete(&mut self, day: i64) -> bool {
        let was_completed = self.completed.contains(&day);

        let result = if was_completed {
            self.client
                .remove_completed_workout(&self.device_id, day)
                .await
        } else {
            self.client
                .add_completed_workout(&self.device_id, day)
                .await
                .map(|_| ())
        };

        match result {
            Ok(()) => {
                if was_completed {
                    self.completed.remove(&day);
                } else {
                    self.completed.insert(day);
                }
                debug!("Day {} toggled (completed: {})", day, !was_completed);
                true
            }
            Err(e) => {
                warn!("Failed to toggle day {}: {:#}", day, e);
                false
            }
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn completed_workouts(&self) -> &BTreeSet<i64> {
        &self.completed
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_workout_completed(&self, day: i64) -> bool {
        self.completed.contains(&day)
    }

    pub fn total_completed(&self) -> usize {
        self.completed.len()
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        progress::calculate_streak(self.start_date, &self.completed, today)
    }

    pub fn weekly_stats(&self) -> Vec<WeeklyStat> {
        progress::weekly_stats(&self.completed)
    }

    pub fn current_day(&self, today: NaiveDate) -> Option<i64> {
        progress::current_day(self.start_date, today)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid start date {:?}", raw))
}
