use anyhow::{bail, Context, Result};
use race_plan::{Day, TrainingDay, WorkoutDescriptor, WorkoutType};

/// Parse a `--day` argument such as `mon=easy,strength:Gym`.
///
/// The part before `=` is the weekday. Workouts are comma separated, each a
/// workout type optionally followed by `:` and a nickname.
pub fn parse_training_day(input: &str) -> Result<TrainingDay> {
    let (day, workouts) = input
        .split_once('=')
        .with_context(|| format!("Expected DAY=WORKOUTS, got '{}'", input))?;

    let day: Day = day.parse()?;

    let workouts = workouts
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_descriptor)
        .collect::<Result<Vec<_>>>()?;

    if workouts.is_empty() {
        bail!("No workouts listed for {}", day);
    }

    Ok(TrainingDay::new(day, workouts))
}

fn parse_descriptor(part: &str) -> Result<WorkoutDescriptor> {
    let (run_type, nickname) = match part.split_once(':') {
        Some((run_type, nickname)) => (run_type, Some(nickname.trim().to_string())),
        None => (part, None),
    };

    let run_type: WorkoutType = run_type.parse()?;
    Ok(WorkoutDescriptor::new(
        run_type,
        nickname.filter(|n| !n.is_empty()),
    ))
}
