//! Progress derivation - streak, weekly stats and calendar mapping
//!
//! Everything here is pure: it takes the start date, the set of completed
//! program days and "today", and never touches the network or storage.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::program::{self, PROGRAM_DAYS, PROGRAM_WEEKS, Workout};

/// Completion stats for one program week (mandatory workouts only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyStat {
    pub week: u32,
    pub completed: u32,
    pub total: u32,
}

impl WeeklyStat {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Count of consecutive completed days walking back from today.
///
/// The walk starts at `min(current day, 28)` and stops at the first
/// mandatory workout that is not completed. Completed days add to the
/// streak whether optional or not; incomplete optional days are skipped.
pub fn calculate_streak(
    start_date: Option<NaiveDate>,
    completed: &BTreeSet<i64>,
    today: NaiveDate,
) -> u32 {
    let Some(start_date) = start_date else {
        return 0;
    };
    if completed.is_empty() {
        return 0;
    }

    let current_day = program::day_number(start_date, today);
    let walk_from = current_day.min(PROGRAM_DAYS as i64);

    let mut streak = 0;
    for day in (1..=walk_from).rev() {
        let is_completed = completed.contains(&day);
        let mandatory = program::find_workout(day as u32).is_some_and(Workout::is_mandatory);
        if mandatory && !is_completed {
            break;
        }
        if is_completed {
            streak += 1;
        }
    }
    streak
}

/// Per-week mandatory completion counts for weeks 1..=4
pub fn weekly_stats(completed: &BTreeSet<i64>) -> Vec<WeeklyStat> {
    (1..=PROGRAM_WEEKS)
        .map(|week| {
            let mandatory: Vec<_> = program::week_workouts(week)
                .filter(|w| w.is_mandatory())
                .collect();
            let done = mandatory
                .iter()
                .filter(|w| completed.contains(&i64::from(w.day)))
                .count();
            WeeklyStat {
                week,
                completed: done as u32,
                total: mandatory.len() as u32,
            }
        })
        .collect()
}

/// Program day for today, if a start date is set
pub fn current_day(start_date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    start_date.map(|start| program::day_number(start, today))
}

/// One cell of a month calendar grid
#[derive(Debug, Clone)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day_number: Option<u32>,
    pub workout: Option<&'static Workout>,
    pub is_completed: bool,
    pub is_today: bool,
    /// false for padding days from the previous/next month
    pub in_month: bool,
}

impl CalendarDay {
    pub fn is_in_program(&self) -> bool {
        self.day_number.is_some()
    }
}

/// Calendar grid for a month, padded to whole Sunday-first weeks.
///
/// Padding days never carry a program day; only dates inside the month
/// are mapped onto the program.
pub fn calendar_month(
    start_date: NaiveDate,
    year: i32,
    month: u32,
    completed: &BTreeSet<i64>,
    today: NaiveDate,
) -> Option<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_month - Duration::days(1);

    let padding_day = |date: NaiveDate| CalendarDay {
        date,
        day_number: None,
        workout: None,
        is_completed: false,
        is_today: false,
        in_month: false,
    };

    let mut days = Vec::with_capacity(42);

    let leading = first.weekday().num_days_from_sunday() as i64;
    for offset in (1..=leading).rev() {
        days.push(padding_day(first - Duration::days(offset)));
    }

    for date in first.iter_days().take_while(|d| *d <= last) {
        let workout = program::workout_for_date(start_date, date);
        let day_number = workout.map(|w| w.day);
        days.push(CalendarDay {
            date,
            day_number,
            workout,
            is_completed: day_number.is_some_and(|d| completed.contains(&i64::from(d))),
            is_today: date == today,
            in_month: true,
        });
    }

    let remainder = days.len() % 7;
    if remainder != 0 {
        for offset in 0..(7 - remainder) as i64 {
            days.push(padding_day(next_month + Duration::days(offset)));
        }
    }

    Some(days)
}
