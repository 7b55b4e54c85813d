use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::calendar::Day;
use super::workout::WorkoutType;
use crate::errors::{GoalError, GoalIssue};

/// Fallback target when a custom distance is selected but unusable (km)
pub const DEFAULT_CUSTOM_DISTANCE: f64 = 10.0;

/// Race distance chosen in the goal form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceDistance {
    #[serde(rename = "5k")]
    FiveK,
    #[serde(rename = "10k")]
    TenK,
    #[serde(rename = "half")]
    Half,
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "custom")]
    Custom,
}

impl RaceDistance {
    /// Target distance in km. A missing or non-positive custom value falls
    /// back to [`DEFAULT_CUSTOM_DISTANCE`].
    pub fn resolve(&self, custom: Option<f64>) -> f64 {
        self.resolve_or(custom, DEFAULT_CUSTOM_DISTANCE)
    }

    /// Like [`RaceDistance::resolve`] with an explicit custom fallback
    pub fn resolve_or(&self, custom: Option<f64>, fallback: f64) -> f64 {
        match self {
            RaceDistance::FiveK => 5.0,
            RaceDistance::TenK => 10.0,
            RaceDistance::Half => 21.1,
            RaceDistance::Full => 42.2,
            RaceDistance::Custom => match custom {
                Some(d) if d.is_finite() && d > 0.0 => d,
                _ => fallback,
            },
        }
    }
}

impl std::fmt::Display for RaceDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RaceDistance::FiveK => write!(f, "5k"),
            RaceDistance::TenK => write!(f, "10k"),
            RaceDistance::Half => write!(f, "half"),
            RaceDistance::Full => write!(f, "full"),
            RaceDistance::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for RaceDistance {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5k" => Ok(RaceDistance::FiveK),
            "10k" => Ok(RaceDistance::TenK),
            "half" | "half-marathon" => Ok(RaceDistance::Half),
            "full" | "marathon" => Ok(RaceDistance::Full),
            "custom" => Ok(RaceDistance::Custom),
            _ => Err(anyhow::anyhow!("Invalid race distance: {}", s)),
        }
    }
}

/// One workout requested on a training day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDescriptor {
    pub run_type: WorkoutType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl WorkoutDescriptor {
    pub fn new(run_type: WorkoutType, nickname: Option<String>) -> Self {
        Self { run_type, nickname }
    }
}

/// A weekday selected for training and the workouts to schedule on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDay {
    pub day: Day,
    pub workouts: Vec<WorkoutDescriptor>,
}

impl TrainingDay {
    pub fn new(day: Day, workouts: Vec<WorkoutDescriptor>) -> Self {
        Self { day, workouts }
    }
}

/// Race goal submitted by the user; input to plan generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalInputs {
    pub today_date: NaiveDate,
    pub race_date: NaiveDate,
    pub race_distance: RaceDistance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_race_distance: Option<f64>,
    #[serde(default)]
    pub training_days: Vec<TrainingDay>,
}

impl GoalInputs {
    /// Resolved race distance in km
    pub fn target_distance(&self) -> f64 {
        self.race_distance.resolve(self.custom_race_distance)
    }

    /// Check the rules the goal form enforces before submission.
    ///
    /// Plan generation does not call this; it degrades to an empty plan or a
    /// defaulted distance instead.
    pub fn validate(&self) -> Result<(), GoalError> {
        let mut issues = Vec::new();

        if self.race_date <= self.today_date {
            issues.push(GoalIssue::RaceNotAfterToday {
                today: self.today_date,
                race: self.race_date,
            });
        }

        if self.race_distance == RaceDistance::Custom
            && !matches!(self.custom_race_distance, Some(d) if d.is_finite() && d > 0.0)
        {
            issues.push(GoalIssue::CustomDistanceRequired);
        }

        if self.training_days.is_empty() {
            issues.push(GoalIssue::NoTrainingDays);
        }

        let mut seen = HashSet::new();
        for training_day in &self.training_days {
            if !seen.insert(training_day.day) {
                issues.push(GoalIssue::DuplicateTrainingDay(training_day.day));
            }
            if training_day.workouts.is_empty() {
                issues.push(GoalIssue::EmptyTrainingDay(training_day.day));
            }
            if training_day
                .workouts
                .iter()
                .any(|w| !w.run_type.is_schedulable())
            {
                issues.push(GoalIssue::RestWorkout(training_day.day));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(GoalError::Invalid(issues))
        }
    }
}
