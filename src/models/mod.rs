// Plan and goal data models

pub mod calendar;
pub mod goal;
pub mod workout;

pub use calendar::{Day, DaySlots, TrainingPlan, Week, WorkoutLocation};
pub use goal::{GoalInputs, RaceDistance, TrainingDay, WorkoutDescriptor, DEFAULT_CUSTOM_DISTANCE};
pub use workout::{Workout, WorkoutType};
