//! Training program - Concept2 4-week 2K erg test plan
//!
//! Source: https://www.concept2.com/training/plans/2k-erg-test-4-week

use chrono::NaiveDate;
use serde::Serialize;

/// Number of days in the program
pub const PROGRAM_DAYS: u32 = 28;

/// Number of weeks in the program
pub const PROGRAM_WEEKS: u32 = 4;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Steady,
    Intervals,
    Race,
    Rest,
}

impl WorkoutType {
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Steady => "Steady",
            WorkoutType::Intervals => "Intervals",
            WorkoutType::Race => "Race",
            WorkoutType::Rest => "Rest",
        }
    }

    /// Single-char marker for calendar cells
    pub fn marker(&self) -> char {
        match self {
            WorkoutType::Steady => 's',
            WorkoutType::Intervals => 'i',
            WorkoutType::Race => 'R',
            WorkoutType::Rest => '·',
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub day: u32,
    pub week_number: u32,
    pub day_of_week: u32, // 0-6, Sunday = 0
    pub title: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    pub optional: bool,
    pub details: Option<&'static str>,
}

impl Workout {
    pub fn is_mandatory(&self) -> bool {
        !self.optional
    }
}

pub const TRAINING_PROGRAM: &[Workout] = &[
    // Week 1
    Workout {
        day: 1,
        week_number: 1,
        day_of_week: 1,
        title: "Steady State Row",
        description: "30-40 minutes at 18-22 spm",
        kind: WorkoutType::Steady,
        optional: false,
        details: Some("Focus on technique and maintaining a steady pace. Rate 18-22 strokes per minute."),
    },
    Workout {
        day: 2,
        week_number: 1,
        day_of_week: 2,
        title: "Rest Day",
        description: "Active recovery or complete rest",
        kind: WorkoutType::Rest,
        optional: true,
        details: Some("Light stretching or cross-training recommended."),
    },
    Workout {
        day: 3,
        week_number: 1,
        day_of_week: 3,
        title: "Interval Training",
        description: "4 x 1000m with 3 min rest",
        kind: WorkoutType::Intervals,
        optional: false,
        details: Some("Target pace: 2K pace + 5-7 seconds. Full recovery between intervals."),
    },
    Workout {
        day: 4,
        week_number: 1,
        day_of_week: 4,
        title: "Rest Day",
        description: "Active recovery",
        kind: WorkoutType::Rest,
        optional: true,
        details: Some("Optional light exercise or complete rest."),
    },
    Workout {
        day: 5,
        week_number: 1,
        day_of_week: 5,
        title: "Steady State Row",
        description: "40-50 minutes at 18-22 spm",
        kind: WorkoutType::Steady,
        optional: false,
        details: Some("Longer steady row. Keep heart rate in zone 2."),
    },
    Workout {
        day: 6,
        week_number: 1,
        day_of_week: 6,
        title: "Optional Row",
        description: "20-30 min easy rowing",
        kind: WorkoutType::Steady,
        optional: true,
        details: Some("Light technique work if feeling good."),
    },
    Workout {
        day: 7,
        week_number: 1,
        day_of_week: 0,
        title: "Rest Day",
        description: "Complete rest",
        kind: WorkoutType::Rest,
        optional: true,
        details: None,
    },
    // Week 2
    Workout {
        day: 8,
        week_number: 2,
        day_of_week: 1,
        title: "Steady State Row",
        description: "30-40 minutes at 18-22 spm",
        kind: WorkoutType::Steady,
        optional: false,
        details: Some("Maintain consistent split times throughout."),
    },
    Workout {
        day: 9,
        week_number: 2,
        day_of_week: 2,
        title: "Rest Day",
        description: "Active recovery",
        kind: WorkoutType::Rest,
        optional: true,
        details: None,
    },
    Workout {
        day: 10,
        week_number: 2,
        day_of_week: 3,
        title: "Interval Training",
        description: "5 x 750m with 2:30 rest",
        kind: WorkoutType::Intervals,
        optional: false,
        details: Some("Target pace: 2K pace + 3-5 seconds. Push the pace slightly."),
    },
    Workout {
        day: 11,
        week_number: 2,
        day_of_week: 4,
        title: "Rest Day",
        description: "Active recovery",
        kind: WorkoutType::Rest,
        optional: true,
        details: None,
    },
    Workout {
        day: 12,
        week_number: 2,
        day_of_week: 5,
        title: "Steady State Row",
        description: "40-50 minutes at 18-22 spm",
        kind: WorkoutType::Steady,
        optional: false,
        details: Some("Build aerobic base. Focus on power per stroke."),
    },
    Workout {
        day: 13,
        week_number: 2,
        day_of_week: 6,
        title: "Optional Row",
        description: "20-30 min easy rowing",
        kind: WorkoutType::Steady,
        optional: true,
        details: None,
    },
    Workout {
        day: 14,
        week_number: 2,
        day_of_week: 0,
        title: "Rest Day",
        description: "Complete rest",
        kind: WorkoutType::Rest,
        optional: true,
        details: None,
    },
    // Week 3
    Workout {
        day: 15,
        week_number: 3,
        day_of_week: 1,
        title: "Steady State Row",
        description: "35-45 minutes at 18-22 spm",
        kind: WorkoutType::Steady,
        optional: false,
        details: Some("Maintain good form even when fatigued."),
    },
    Workout {
        day: 16,
        week_number: 3,
        day_of_week: 2,
        title: "Rest Day",
        description: "Active recovery",
        kind: WorkoutType::Rest,
        optional: true,
        details: None,
    },
    Workout {
        day: 17,
        week_number: 3,
        day_of_week: 3,
        title: "Interval Training",
        description: "6 x 500m with 2 min rest",
        kind: WorkoutType::Intervals,
        optional: false,
        details: Some("Target pace: 2K pace + 1-2 seconds. Race simulation intervals."),
    },
    Workout {
        day: 18,
        week_number: 3,
        day_of_week: 4,
        title: "Rest Day",
        description: "Active recovery",
        kind: WorkoutType::Rest,
        optional: true,
        details: None,
    },
    Workout {
        day: 19,
        week_number: 3,
        day_of_week: 5,
        title: "Steady State Row",
        description: "30-40 minutes at 18-22 spm",
        kind: WorkoutType::Steady,
        optional: false,
        details: Some("Slightly reduced volume. Start tapering."),
    },
    Workout {
        day: 20,
        week_number: 3,
        day_of_week: 6,
        title: "Optional Row",
        description: "15-20 min easy rowing",
        kind: WorkoutType::Steady,
        optional: true,
        details: None,
    },
    Workout {
        day: 21,
        week_number: 3,
        day_of_week: 0,
        title: "Rest Day",
        description: "Complete rest",
        kind: WorkoutType::Rest,
        optional: true,
        details: None,
    },
    // Week 4 - test week
    Workout {
        day: 22,
        week_number: 4,
        day_of_week: 1,
        title: "Light Steady State",
        description: "20-25 minutes at 18-20 spm",
        kind: WorkoutType::Steady,
        optional: false,
        details: Some("Easy effort. Keep legs fresh for the test."),
    },
    Workout {
        day: 23,
        week_number: 4,
        day_of_week: 2,
        title: "Rest Day",
        description: "Complete rest",
        kind: WorkoutType::Rest,
        optional: true,
        details: Some("Rest and prepare mentally for the test."),
    },
    Workout {
        day: 24,
        week_number: 4,
        day_of_week: 3,
        title: "Race Prep",
        description: "10 min warm-up + 4 x 250m starts",
        kind: WorkoutType::Intervals,
        optional: false,
        details: Some("Practice your race start strategy. Full recovery between pieces."),
    },
    Workout {
        day: 25,
        week_number: 4,
        day_of_week: 4,
        title: "Rest Day",
        description: "Complete rest",
        kind: WorkoutType::Rest,
        optional: false,
        details: Some("Critical rest day before the test."),
    },
    Workout {
        day: 26,
        week_number: 4,
        day_of_week: 5,
        title: "2K ERG TEST",
        description: "Full 2000m test!",
        kind: WorkoutType::Race,
        optional: false,
        details: Some("Give it everything! Remember your pacing strategy."),
    },
    Workout {
        day: 27,
        week_number: 4,
        day_of_week: 6,
        title: "Recovery Row",
        description: "15-20 min very light rowing",
        kind: WorkoutType::Steady,
        optional: true,
        details: Some("Celebrate and recover!"),
    },
    Workout {
        day: 28,
        week_number: 4,
        day_of_week: 0,
        title: "Rest Day",
        description: "Complete rest",
        kind: WorkoutType::Rest,
        optional: true,
        details: None,
    },
];

pub fn get_program() -> &'static [Workout] {
    TRAINING_PROGRAM
}

/// Workout for a program day (1-based)
pub fn find_workout(day: u32) -> Option<&'static Workout> {
    if day == 0 {
        return None;
    }
    TRAINING_PROGRAM.get(day as usize - 1)
}

pub fn week_workouts(week: u32) -> impl Iterator<Item = &'static Workout> {
    TRAINING_PROGRAM.iter().filter(move |w| w.week_number == week)
}

/// Program day for a date; may fall outside 1..=28
pub fn day_number(start_date: NaiveDate, date: NaiveDate) -> i64 {
    (date - start_date).num_days() + 1
}

pub fn is_within_program(start_date: NaiveDate, date: NaiveDate) -> bool {
    let day = day_number(start_date, date);
    day >= 1 && day <= PROGRAM_DAYS as i64
}

pub fn workout_for_date(start_date: NaiveDate, date: NaiveDate) -> Option<&'static Workout> {
    if !is_within_program(start_date, date) {
        return None;
    }
    find_workout(day_number(start_date, date) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_program_has_28_contiguous_days() {
        assert_eq!(TRAINING_PROGRAM.len(), PROGRAM_DAYS as usize);
        for (i, workout) in TRAINING_PROGRAM.iter().enumerate() {
            assert_eq!(workout.day, i as u32 + 1);
        }
    }

    #[test]
    fn test_week_number_is_ceil_of_day() {
        for workout in TRAINING_PROGRAM {
            assert_eq!(workout.week_number, workout.day.div_ceil(7), "day {}", workout.day);
            assert!(workout.day_of_week <= 6);
        }
    }

    #[test]
    fn test_find_workout_bounds() {
        assert!(find_workout(0).is_none());
        assert_eq!(find_workout(1).unwrap().title, "Steady State Row");
        assert_eq!(find_workout(26).unwrap().kind, WorkoutType::Race);
        assert!(find_workout(29).is_none());
    }

    #[test]
    fn test_each_week_has_mandatory_workouts() {
        for week in 1..=PROGRAM_WEEKS {
            assert_eq!(week_workouts(week).count(), 7);
            assert!(week_workouts(week).any(|w| w.is_mandatory()));
        }
    }

    #[test]
    fn test_day_number() {
        let start = date(2024, 1, 1);
        assert_eq!(day_number(start, start), 1);
        assert_eq!(day_number(start, date(2024, 1, 28)), 28);
        assert_eq!(day_number(start, date(2023, 12, 31)), 0);
        assert_eq!(day_number(start, date(2024, 2, 1)), 32);
    }

    #[test]
    fn test_workout_for_date() {
        let start = date(2024, 1, 1);
        assert_eq!(workout_for_date(start, date(2024, 1, 3)).unwrap().day, 3);
        assert!(workout_for_date(start, date(2023, 12, 31)).is_none());
        assert!(workout_for_date(start, date(2024, 1, 29)).is_none());
        assert!(is_within_program(start, date(2024, 1, 28)));
    }

    #[test]
    fn test_workout_type_serializes_lowercase() {
        let json = serde_json::to_value(find_workout(3).unwrap()).unwrap();
        assert_eq!(json["type"], "intervals");
        assert_eq!(json["weekNumber"], 1);
        assert_eq!(json["dayOfWeek"], 3);
    }
}
