use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use race_plan::services::span_weeks;
use race_plan::{GoalInputs, PlanGenerationService, RaceDistance, TrainingDay, UuidIds};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::storage::Storage;

use super::training_day_parser::parse_training_day;

#[derive(Args)]
pub struct GenerateCommand {
    /// Read the goal from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["race_date", "custom_distance", "days"])]
    goal: Option<PathBuf>,

    /// Regenerate from the last stored goal
    #[arg(long, conflicts_with_all = ["goal", "race_date", "custom_distance", "days"])]
    last: bool,

    /// Race date (YYYY-MM-DD)
    #[arg(long, required_unless_present_any = ["goal", "last"])]
    race_date: Option<NaiveDate>,

    /// Race distance: 5k, 10k, half, full or custom
    #[arg(long, default_value = "10k")]
    distance: RaceDistance,

    /// Race distance in km when --distance is custom
    #[arg(long)]
    custom_distance: Option<f64>,

    /// Training day, e.g. "mon=easy,strength:Gym" (repeatable)
    #[arg(
        long = "day",
        value_name = "DAY=WORKOUTS",
        required_unless_present_any = ["goal", "last"]
    )]
    days: Vec<String>,

    /// Plan start date (defaults to the local date)
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl GenerateCommand {
    pub fn execute(self, config: &Config, storage: &Storage) -> Result<()> {
        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let goal = self.goal_inputs(storage, today)?;

        goal.validate()?;

        let weeks = span_weeks(goal.today_date, goal.race_date);
        if weeks > i64::from(config.plan.max_weeks) {
            println!(
                "⚠ The race is {} weeks away; only the first {} weeks are planned",
                weeks, config.plan.max_weeks
            );
        }

        let mut generator = PlanGenerationService::with_ids(config.plan.clone(), UuidIds);
        let plan = generator.generate_plan(&goal);

        storage.save_goal(&goal)?;
        storage.save_plan(&plan)?;

        let target = goal
            .race_distance
            .resolve_or(goal.custom_race_distance, config.plan.default_custom_distance);
        println!(
            "✓ {} km plan generated: {} weeks until {}",
            target,
            plan.weeks.len(),
            goal.race_date
        );
        println!();
        super::show::print_plan(&plan, config, config.export.orientation)
    }

    /// Goal from `--last`, `--goal` or the flags; `today` always replaces the
    /// stored start date
    fn goal_inputs(&self, storage: &Storage, today: NaiveDate) -> Result<GoalInputs> {
        if self.last {
            let mut goal = storage
                .load_goal()?
                .context("No stored goal found. Run `race-plan generate` with a goal first")?;
            tracing::debug!("Regenerating from stored goal for {}", goal.race_date);
            goal.today_date = today;
            return Ok(goal);
        }

        if let Some(path) = &self.goal {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read goal file {}", path.display()))?;
            let mut goal: GoalInputs = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse goal file {}", path.display()))?;
            goal.today_date = today;
            return Ok(goal);
        }

        let race_date = self.race_date.context("--race-date is required")?;
        let training_days = self
            .days
            .iter()
            .map(|day| parse_training_day(day))
            .collect::<Result<Vec<TrainingDay>>>()?;

        Ok(GoalInputs {
            today_date: today,
            race_date,
            race_distance: self.distance,
            custom_race_distance: self.custom_distance,
            training_days,
        })
    }
}
