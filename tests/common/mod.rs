// Shared fixtures for plan tests
#![allow(dead_code)]

use chrono::NaiveDate;
use race_plan::models::{
    Day, GoalInputs, RaceDistance, TrainingDay, TrainingPlan, WorkoutDescriptor, WorkoutType,
};
use race_plan::{PlanConfig, PlanEditingService, PlanGenerationService, SequentialIds};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn training_day(day: Day, types: &[WorkoutType]) -> TrainingDay {
    TrainingDay::new(
        day,
        types
            .iter()
            .map(|t| WorkoutDescriptor::new(*t, None))
            .collect(),
    )
}

/// Four training days with a mix of workout types, 10k race
pub fn standard_goal(today: NaiveDate, race: NaiveDate) -> GoalInputs {
    GoalInputs {
        today_date: today,
        race_date: race,
        race_distance: RaceDistance::TenK,
        custom_race_distance: None,
        training_days: vec![
            training_day(Day::Mon, &[WorkoutType::Easy, WorkoutType::Strength]),
            training_day(Day::Wed, &[WorkoutType::Interval]),
            training_day(Day::Thu, &[WorkoutType::Tempo]),
            training_day(Day::Sun, &[WorkoutType::Long]),
        ],
    }
}

pub fn generator() -> PlanGenerationService<SequentialIds> {
    PlanGenerationService::with_ids(PlanConfig::default(), SequentialIds::new("gen"))
}

pub fn editor() -> PlanEditingService<SequentialIds> {
    PlanEditingService::with_ids(PlanConfig::default(), SequentialIds::new("edit"))
}

pub fn generate(goal: &GoalInputs) -> TrainingPlan {
    generator().generate_plan(goal)
}

/// Generate a plan and pass the generator's id counter on to an editor
pub fn generate_with_editor(
    goal: &GoalInputs,
) -> (TrainingPlan, PlanEditingService<SequentialIds>) {
    let mut generator =
        PlanGenerationService::with_ids(PlanConfig::default(), SequentialIds::default());
    let plan = generator.generate_plan(goal);
    let editor = PlanEditingService::with_ids(PlanConfig::default(), generator.into_ids());
    (plan, editor)
}
