//! Database module - SQLite storage for training settings and completions

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

/// Settings row for a device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSettings {
    pub device_id: String,
    pub start_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Completion record for one program day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedWorkout {
    pub day: i64,
    pub completed_at: String,
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database, creating its parent directory if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating database directory {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening database {}", path.display()))?;
        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!("SQLite journal mode: {}", journal_mode);

        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// In-memory database (tests)
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS training_settings (
                device_id TEXT PRIMARY KEY,
                start_date TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS completed_workouts (
                device_id TEXT NOT NULL,
                workout_day INTEGER NOT NULL,
                completed_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (device_id, workout_day)
            );",
        )?;
        Ok(())
    }

    /// Start date for a device, `None` for a device that hasn't onboarded yet
    pub fn get_start_date(&self, device_id: &str) -> Result<Option<String>> {
        let start_date = self
            .conn
            .query_row(
                "SELECT start_date FROM training_settings WHERE device_id = ?1",
                params![device_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(start_date)
    }

    /// Full settings row including audit columns
    pub fn get_training_settings(&self, device_id: &str) -> Result<Option<TrainingSettings>> {
        let settings = self
            .conn
            .query_row(
                "SELECT device_id, start_date, created_at, updated_at
                 FROM training_settings WHERE device_id = ?1",
                params![device_id],
                |row| {
                    Ok(TrainingSettings {
                        device_id: row.get(0)?,
                        start_date: row.get(1)?,
                        created_at: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(settings)
    }

    /// Insert or overwrite the start date, refreshing `updated_at`
    pub fn upsert_start_date(&self, device_id: &str, start_date: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO training_settings (device_id, start_date, updated_at)
             VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(device_id) DO UPDATE SET
                start_date = excluded.start_date,
                updated_at = CURRENT_TIMESTAMP",
            params![device_id, start_date],
        )?;
        Ok(())
    }

    /// All completions for a device (order not significant)
    pub fn get_completed_workouts(&self, device_id: &str) -> Result<Vec<CompletedWorkout>> {
        let mut stmt = self.conn.prepare(
            "SELECT workout_day, completed_at FROM completed_workouts WHERE device_id = ?1",
        )?;

        let completed = stmt
            .query_map(params![device_id], |row| {
                Ok(CompletedWorkout {
                    day: row.get(0)?,
                    completed_at: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(completed)
    }

    /// Mark a day completed; re-marking only refreshes `completed_at`
    pub fn upsert_completed_workout(&self, device_id: &str, day: i64, completed_at: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO completed_workouts (device_id, workout_day, completed_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(device_id, workout_day) DO UPDATE SET
                completed_at = excluded.completed_at",
            params![device_id, day, completed_at],
        )?;
        Ok(())
    }

    /// Remove a completion. Returns whether a row existed.
    pub fn delete_completed_workout(&self, device_id: &str, day: i64) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM completed_workouts WHERE device_id = ?1 AND workout_day = ?2",
            params![device_id, day],
        )?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE: &str = "device-a";

    #[test]
    fn test_start_date_missing_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_start_date(DEVICE).unwrap(), None);
        assert!(db.get_training_settings(DEVICE).unwrap().is_none());
    }

    #[test]
    fn test_upsert_start_date_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_start_date(DEVICE, "2024-01-01").unwrap();
        db.upsert_start_date(DEVICE, "2024-02-01").unwrap();

        assert_eq!(db.get_start_date(DEVICE).unwrap().as_deref(), Some("2024-02-01"));

        let settings = db.get_training_settings(DEVICE).unwrap().unwrap();
        assert_eq!(settings.device_id, DEVICE);
        assert!(!settings.created_at.is_empty());
        assert!(!settings.updated_at.is_empty());
    }

    #[test]
    fn test_settings_scoped_by_device() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_start_date(DEVICE, "2024-01-01").unwrap();
        assert_eq!(db.get_start_date("device-b").unwrap(), None);
    }

    #[test]
    fn test_upsert_completed_no_duplicates() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_completed_workout(DEVICE, 3, "2024-01-03T08:00:00.000Z").unwrap();
        db.upsert_completed_workout(DEVICE, 3, "2024-01-03T09:00:00.000Z").unwrap();

        let completed = db.get_completed_workouts(DEVICE).unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].day, 3);
        assert_eq!(completed[0].completed_at, "2024-01-03T09:00:00.000Z");
    }

    #[test]
    fn test_delete_completed_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_completed_workout(DEVICE, 1, "2024-01-01T08:00:00.000Z").unwrap();

        assert!(db.delete_completed_workout(DEVICE, 1).unwrap());
        assert!(!db.delete_completed_workout(DEVICE, 1).unwrap());
        assert!(db.get_completed_workouts(DEVICE).unwrap().is_empty());
    }

    #[test]
    fn test_delete_only_touches_own_device() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_completed_workout(DEVICE, 1, "2024-01-01T08:00:00.000Z").unwrap();
        db.upsert_completed_workout("device-b", 1, "2024-01-01T08:00:00.000Z").unwrap();

        db.delete_completed_workout(DEVICE, 1).unwrap();
        assert_eq!(db.get_completed_workouts("device-b").unwrap().len(), 1);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ergotracker.db");

        let db = Database::open(&path).unwrap();
        db.upsert_start_date(DEVICE, "2024-01-01").unwrap();
        drop(db);

        assert!(path.exists());
        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.get_start_date(DEVICE).unwrap().as_deref(), Some("2024-01-01"));
    }
}
