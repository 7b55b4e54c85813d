//! Race training calendar generation and editing.
//!
//! [`PlanGenerationService`] turns a [`GoalInputs`] record into a
//! [`TrainingPlan`]; [`PlanEditingService`] applies user edits to that plan
//! while keeping every weekly total in step with its workouts.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::PlanConfig;
pub use errors::{EditError, GoalError, GoalIssue};
pub use models::{
    Day, GoalInputs, RaceDistance, TrainingDay, TrainingPlan, Week, Workout, WorkoutDescriptor,
    WorkoutLocation, WorkoutType,
};
pub use services::{
    generate_plan, IdSource, PlanEditingService, PlanGenerationService, SequentialIds, UuidIds,
};
