use chrono::{Datelike, Duration, NaiveDate};

use crate::config::PlanConfig;
use crate::models::{Day, GoalInputs, TrainingPlan, Week, Workout, WorkoutType};

use super::id_source::{IdSource, UuidIds};

/// Builds the initial training calendar from a race goal
#[derive(Debug, Clone)]
pub struct PlanGenerationService<I: IdSource = UuidIds> {
    config: PlanConfig,
    ids: I,
}

impl PlanGenerationService<UuidIds> {
    pub fn new() -> Self {
        Self::with_ids(PlanConfig::default(), UuidIds)
    }
}

impl Default for PlanGenerationService<UuidIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> PlanGenerationService<I> {
    pub fn with_ids(config: PlanConfig, ids: I) -> Self {
        Self { config, ids }
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Hand the id source back so an editor working on the generated plan
    /// keeps numbering where generation stopped
    pub fn into_ids(self) -> I {
        self.ids
    }

    /// Generate a plan for the goal.
    ///
    /// Never fails: a goal with no training days or a race date that is not
    /// after today produces an empty plan, and spans longer than
    /// `max_weeks` are truncated with a warning.
    pub fn generate_plan(&mut self, goal: &GoalInputs) -> TrainingPlan {
        if goal.training_days.is_empty() {
            tracing::debug!("No training days selected, nothing to generate");
            return TrainingPlan::default();
        }

        if goal.race_date <= goal.today_date {
            tracing::debug!(
                "Race date {} is not after {}, nothing to generate",
                goal.race_date,
                goal.today_date
            );
            return TrainingPlan::default();
        }

        let total_weeks = span_weeks(goal.today_date, goal.race_date);
        if total_weeks <= 0 {
            return TrainingPlan::default();
        }

        let max_weeks = i64::from(self.config.max_weeks);
        if total_weeks > max_weeks {
            tracing::warn!(
                "Training plan limited to {} weeks maximum ({} weeks requested)",
                max_weeks,
                total_weeks
            );
        }
        let limited_weeks = total_weeks.min(max_weeks) as u32;

        let max_distance = goal
            .race_distance
            .resolve_or(goal.custom_race_distance, self.config.default_custom_distance);
        let first_week_start = week_start(goal.today_date);

        let mut weeks = Vec::with_capacity(limited_weeks as usize);
        for week_number in 1..=limited_weeks {
            let start_date = first_week_start + Duration::weeks(i64::from(week_number - 1));
            weeks.push(self.build_week(goal, week_number, limited_weeks, start_date, max_distance));
        }

        let mut plan = TrainingPlan { weeks };
        self.apply_race_day(&mut plan, Day::of(goal.race_date), max_distance);

        tracing::info!(
            "Generated {}-week plan for a {} km race on {}",
            limited_weeks,
            max_distance,
            goal.race_date
        );

        plan
    }

    fn build_week(
        &mut self,
        goal: &GoalInputs,
        week_number: u32,
        total_weeks: u32,
        start_date: NaiveDate,
        max_distance: f64,
    ) -> Week {
        let mut week = Week::new(week_number, start_date);

        for training_day in &goal.training_days {
            for descriptor in &training_day.workouts {
                if !descriptor.run_type.is_schedulable() {
                    tracing::debug!("Skipping Rest entry on {}", training_day.day);
                    continue;
                }

                let distance =
                    self.run_distance(descriptor.run_type, week_number, total_weeks, max_distance);
                week.days.get_mut(training_day.day).push(Workout::new(
                    self.ids.next_id(),
                    descriptor.run_type,
                    distance,
                    descriptor.nickname.clone(),
                ));
            }
        }

        week.recompute_total();
        week
    }

    /// Target distance for a workout type in a given week, rounded to whole km
    pub fn run_distance(
        &self,
        run_type: WorkoutType,
        week_number: u32,
        total_weeks: u32,
        max_distance: f64,
    ) -> f64 {
        let fraction = self.distance_fraction(run_type, week_number, total_weeks);
        (max_distance * fraction).round().max(0.0)
    }

    fn distance_fraction(&self, run_type: WorkoutType, week_number: u32, total_weeks: u32) -> f64 {
        // Very short plans use fixed fractions
        if total_weeks < self.config.short_plan_weeks {
            return match run_type {
                WorkoutType::Long => 0.6,
                WorkoutType::Easy => 0.3,
                WorkoutType::Tempo => 0.4,
                WorkoutType::Interval => 0.2,
                _ => 0.0,
            };
        }

        let build_weeks = i64::from(total_weeks) - i64::from(self.config.taper_weeks);

        // Taper
        if i64::from(week_number) > build_weeks {
            return match run_type {
                WorkoutType::Long => 0.35,
                WorkoutType::Easy => 0.15,
                WorkoutType::Tempo => 0.2,
                WorkoutType::Interval => 0.1,
                _ => 0.0,
            };
        }

        let progress = f64::from(week_number) / build_weeks as f64;

        match run_type {
            // 20% ramping to 90% of race distance at the start of the taper
            WorkoutType::Long => 0.2 + 0.7 * progress,
            WorkoutType::Easy => 0.25,
            WorkoutType::Tempo => 0.4,
            WorkoutType::Interval => 0.2,
            _ => 0.0,
        }
    }

    /// Replace whatever the final week holds on the race weekday with the
    /// race itself.
    fn apply_race_day(&mut self, plan: &mut TrainingPlan, race_day: Day, race_distance: f64) {
        let Some(last_week) = plan.weeks.last_mut() else {
            return;
        };

        let slot = last_week.days.get_mut(race_day);
        if !slot.is_empty() {
            tracing::debug!(
                "Race day {} in week {} replaces {} scheduled workout(s)",
                race_day,
                last_week.week,
                slot.len()
            );
        }
        *slot = vec![Workout::new(
            self.ids.next_id(),
            WorkoutType::Race,
            race_distance,
            None,
        )];

        last_week.recompute_total();
    }
}

/// Monday on or before the date
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Number of calendar weeks from today's week through the race week,
/// inclusive. Zero or negative when the race week lies before today's week.
pub fn span_weeks(today: NaiveDate, race: NaiveDate) -> i64 {
    (week_start(race) - week_start(today)).num_weeks() + 1
}

/// Generate a plan with default settings and random workout ids
pub fn generate_plan(goal: &GoalInputs) -> TrainingPlan {
    PlanGenerationService::new().generate_plan(goal)
}
