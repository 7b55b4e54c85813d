use anyhow::Result;
use race_plan::services::coerce_distance;
use race_plan::{Day, PlanEditingService, TrainingPlan, UuidIds, WorkoutLocation, WorkoutType};

use crate::config::Config;
use crate::storage::Storage;

fn editor(config: &Config) -> PlanEditingService<UuidIds> {
    PlanEditingService::with_ids(config.plan.clone(), UuidIds)
}

/// Persist an edited plan and print the weeks it touched
fn save_and_print(
    config: &Config,
    storage: &Storage,
    plan: &TrainingPlan,
    weeks: &[u32],
    message: &str,
) -> Result<()> {
    storage.save_plan(plan)?;

    println!("✓ {}", message);

    let mut touched: Vec<u32> = weeks.to_vec();
    touched.dedup();
    let affected = TrainingPlan {
        weeks: touched
            .iter()
            .filter_map(|n| plan.week(*n).cloned())
            .collect(),
    };
    println!();
    super::show::print_plan(&affected, config, config.export.orientation)
}

pub fn update_distance(
    config: &Config,
    storage: &Storage,
    week: u32,
    day: Day,
    index: usize,
    distance: &str,
) -> Result<()> {
    let plan = super::load_plan(storage)?;
    let km = coerce_distance(distance);

    let at = WorkoutLocation::new(week, day, index);
    let updated = editor(config).try_update_distance(&plan, at, km)?;

    save_and_print(config, storage, &updated, &[week], &format!("Distance set to {} km", km))
}

pub fn update_nickname(
    config: &Config,
    storage: &Storage,
    week: u32,
    day: Day,
    index: usize,
    nickname: &str,
) -> Result<()> {
    let plan = super::load_plan(storage)?;
    let at = WorkoutLocation::new(week, day, index);

    let updated = editor(config).try_update_nickname(&plan, at, nickname)?;

    let message = match updated.workout(at).and_then(|w| w.nickname.as_deref()) {
        Some(name) => format!("Workout renamed to '{}'", name),
        None => "Nickname cleared".to_string(),
    };
    save_and_print(config, storage, &updated, &[week], &message)
}

pub fn add_workout(
    config: &Config,
    storage: &Storage,
    week: u32,
    day: Day,
    workout_type: WorkoutType,
    nickname: Option<String>,
) -> Result<()> {
    let plan = super::load_plan(storage)?;

    let updated = editor(config).try_add_workout(&plan, week, day, workout_type, nickname)?;

    save_and_print(
        config,
        storage,
        &updated,
        &[week],
        &format!("{} workout added to week {} {}", workout_type, week, day),
    )
}

pub fn remove_workout(
    config: &Config,
    storage: &Storage,
    week: u32,
    day: Day,
    index: usize,
) -> Result<()> {
    let plan = super::load_plan(storage)?;
    let at = WorkoutLocation::new(week, day, index);

    let updated = editor(config).try_remove_workout(&plan, at)?;

    save_and_print(config, storage, &updated, &[week], &format!("Removed workout at {}", at))
}

pub fn move_workout(
    config: &Config,
    storage: &Storage,
    from: WorkoutLocation,
    (to_week, to_day, to_index): (u32, Day, Option<usize>),
) -> Result<()> {
    let plan = super::load_plan(storage)?;

    // append by default, measured after the workout leaves its source
    let to_index = to_index.unwrap_or_else(|| {
        let len = plan
            .week(to_week)
            .map(|w| w.days.get(to_day).len())
            .unwrap_or(0);
        if from.week == to_week && from.day == to_day {
            len.saturating_sub(1)
        } else {
            len
        }
    });
    let to = WorkoutLocation::new(to_week, to_day, to_index);

    let updated = editor(config).try_move_workout(&plan, from, to)?;

    save_and_print(
        config,
        storage,
        &updated,
        &[from.week, to.week],
        &format!("Moved workout from {} to {}", from, to),
    )
}
