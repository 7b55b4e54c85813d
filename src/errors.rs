use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Day, WorkoutLocation};

/// A single problem found in a goal submission
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GoalIssue {
    #[error("Race date {race} must be after today's date {today}")]
    RaceNotAfterToday { today: NaiveDate, race: NaiveDate },
    #[error("Custom distance is required and must be greater than 0")]
    CustomDistanceRequired,
    #[error("Select at least one training day")]
    NoTrainingDays,
    #[error("{0} needs at least one workout")]
    EmptyTrainingDay(Day),
    #[error("{0} is selected more than once")]
    DuplicateTrainingDay(Day),
    #[error("{0} lists a Rest workout; leave the day out instead")]
    RestWorkout(Day),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GoalError {
    #[error("Invalid goal: {}", join_issues(.0))]
    Invalid(Vec<GoalIssue>),
}

impl GoalError {
    pub fn issues(&self) -> &[GoalIssue] {
        match self {
            GoalError::Invalid(issues) => issues,
        }
    }
}

fn join_issues(issues: &[GoalIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Why a calendar edit could not be applied
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Week {0} is not part of the plan")]
    WeekNotFound(u32),
    #[error("No workout at {0}")]
    WorkoutNotFound(WorkoutLocation),
    #[error("Cannot insert at position {index} of {day} in week {week} ({len} workouts)")]
    InsertOutOfRange {
        week: u32,
        day: Day,
        index: usize,
        len: usize,
    },
    #[error("Rest days are empty days and cannot be scheduled as workouts")]
    RestNotSchedulable,
}
