use crate::config::PlanConfig;
use crate::errors::EditError;
use crate::models::{Day, TrainingPlan, Workout, WorkoutLocation, WorkoutType};

use super::id_source::{IdSource, UuidIds};

/// Edits an existing calendar.
///
/// Every operation leaves the input untouched and returns a new plan with
/// the affected weekly totals recomputed. The `try_*` forms report why an
/// edit could not be applied; the plain forms return an unchanged copy
/// instead.
#[derive(Debug, Clone)]
pub struct PlanEditingService<I: IdSource = UuidIds> {
    config: PlanConfig,
    ids: I,
}

impl PlanEditingService<UuidIds> {
    pub fn new() -> Self {
        Self::with_ids(PlanConfig::default(), UuidIds)
    }
}

impl Default for PlanEditingService<UuidIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> PlanEditingService<I> {
    pub fn with_ids(config: PlanConfig, ids: I) -> Self {
        Self { config, ids }
    }

    pub fn update_distance(
        &self,
        plan: &TrainingPlan,
        at: WorkoutLocation,
        distance: f64,
    ) -> TrainingPlan {
        or_unchanged(plan, self.try_update_distance(plan, at, distance))
    }

    /// Set a workout's distance. Negative or non-finite input becomes 0.
    pub fn try_update_distance(
        &self,
        plan: &TrainingPlan,
        at: WorkoutLocation,
        distance: f64,
    ) -> Result<TrainingPlan, EditError> {
        ensure_workout(plan, at)?;

        let mut updated = plan.clone();
        let week = week_mut(&mut updated, at.week)?;
        week.days.get_mut(at.day)[at.index].distance = sanitize_distance(distance);
        week.recompute_total();

        Ok(updated)
    }

    pub fn update_nickname(
        &self,
        plan: &TrainingPlan,
        at: WorkoutLocation,
        nickname: &str,
    ) -> TrainingPlan {
        or_unchanged(plan, self.try_update_nickname(plan, at, nickname))
    }

    /// Rename a workout; an empty nickname clears it
    pub fn try_update_nickname(
        &self,
        plan: &TrainingPlan,
        at: WorkoutLocation,
        nickname: &str,
    ) -> Result<TrainingPlan, EditError> {
        ensure_workout(plan, at)?;

        let mut updated = plan.clone();
        let week = week_mut(&mut updated, at.week)?;
        let trimmed = nickname.trim();
        week.days.get_mut(at.day)[at.index].nickname = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };

        Ok(updated)
    }

    pub fn add_workout(
        &mut self,
        plan: &TrainingPlan,
        week: u32,
        day: Day,
        workout_type: WorkoutType,
        nickname: Option<String>,
    ) -> TrainingPlan {
        let result = self.try_add_workout(plan, week, day, workout_type, nickname);
        or_unchanged(plan, result)
    }

    /// Append a new workout to the end of a day
    pub fn try_add_workout(
        &mut self,
        plan: &TrainingPlan,
        week: u32,
        day: Day,
        workout_type: WorkoutType,
        nickname: Option<String>,
    ) -> Result<TrainingPlan, EditError> {
        if !workout_type.is_schedulable() {
            return Err(EditError::RestNotSchedulable);
        }
        if plan.week(week).is_none() {
            return Err(EditError::WeekNotFound(week));
        }

        let distance = if workout_type.has_distance() {
            self.config.added_workout_distance
        } else {
            0.0
        };
        let workout = Workout::new(self.ids.next_id(), workout_type, distance, nickname);

        let mut updated = plan.clone();
        let target = week_mut(&mut updated, week)?;
        tracing::debug!("Adding {} workout {} to week {} {}", workout_type, workout.id, week, day);
        target.days.get_mut(day).push(workout);
        target.recompute_total();

        Ok(updated)
    }

    pub fn remove_workout(&self, plan: &TrainingPlan, at: WorkoutLocation) -> TrainingPlan {
        or_unchanged(plan, self.try_remove_workout(plan, at))
    }

    pub fn try_remove_workout(
        &self,
        plan: &TrainingPlan,
        at: WorkoutLocation,
    ) -> Result<TrainingPlan, EditError> {
        ensure_workout(plan, at)?;

        let mut updated = plan.clone();
        let week = week_mut(&mut updated, at.week)?;
        week.days.get_mut(at.day).remove(at.index);
        week.recompute_total();

        Ok(updated)
    }

    pub fn move_workout(
        &self,
        plan: &TrainingPlan,
        from: WorkoutLocation,
        to: WorkoutLocation,
    ) -> TrainingPlan {
        or_unchanged(plan, self.try_move_workout(plan, from, to))
    }

    /// Relocate one workout.
    ///
    /// `to.index` is the position in the destination day once the workout
    /// has left its source; it may equal the destination length to append.
    /// Both positions are checked before anything changes.
    pub fn try_move_workout(
        &self,
        plan: &TrainingPlan,
        from: WorkoutLocation,
        to: WorkoutLocation,
    ) -> Result<TrainingPlan, EditError> {
        ensure_workout(plan, from)?;

        let destination = plan
            .week(to.week)
            .ok_or(EditError::WeekNotFound(to.week))?;
        let mut len = destination.days.get(to.day).len();
        if from.week == to.week && from.day == to.day {
            len -= 1;
        }
        if to.index > len {
            return Err(EditError::InsertOutOfRange {
                week: to.week,
                day: to.day,
                index: to.index,
                len,
            });
        }

        let mut updated = plan.clone();

        let source = week_mut(&mut updated, from.week)?;
        let workout = source.days.get_mut(from.day).remove(from.index);
        if from.week != to.week {
            source.recompute_total();
        }

        let target = week_mut(&mut updated, to.week)?;
        target.days.get_mut(to.day).insert(to.index, workout);
        target.recompute_total();

        Ok(updated)
    }
}

/// Rebuild every cached weekly total from the day slots
pub fn recompute_totals(plan: &TrainingPlan) -> TrainingPlan {
    let mut updated = plan.clone();
    for week in &mut updated.weeks {
        week.recompute_total();
    }
    updated
}

/// Interpret distance text from an edit field. Empty or invalid input is 0.
pub fn coerce_distance(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(sanitize_distance)
        .unwrap_or(0.0)
}

fn sanitize_distance(distance: f64) -> f64 {
    if distance.is_finite() && distance > 0.0 {
        distance
    } else {
        0.0
    }
}

fn ensure_workout(plan: &TrainingPlan, at: WorkoutLocation) -> Result<(), EditError> {
    let week = plan.week(at.week).ok_or(EditError::WeekNotFound(at.week))?;
    if at.index < week.days.get(at.day).len() {
        Ok(())
    } else {
        Err(EditError::WorkoutNotFound(at))
    }
}

fn week_mut(plan: &mut TrainingPlan, week: u32) -> Result<&mut crate::models::Week, EditError> {
    plan.week_mut(week).ok_or(EditError::WeekNotFound(week))
}

fn or_unchanged(plan: &TrainingPlan, result: Result<TrainingPlan, EditError>) -> TrainingPlan {
    result.unwrap_or_else(|err| {
        tracing::debug!("Edit ignored: {}", err);
        plan.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Week;
    use crate::services::id_source::SequentialIds;
    use chrono::NaiveDate;

    fn editor() -> PlanEditingService<SequentialIds> {
        PlanEditingService::with_ids(PlanConfig::default(), SequentialIds::new("edit"))
    }

    fn easy(id: &str, distance: f64) -> Workout {
        Workout::new(id.to_string(), WorkoutType::Easy, distance, None)
    }

    /// Week 1: Mon [5 km easy]. Week 2: Sat [10 km easy, 3 km easy].
    fn sample_plan() -> TrainingPlan {
        let mut week1 = Week::new(1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        week1.days.mon.push(easy("a", 5.0));
        week1.recompute_total();

        let mut week2 = Week::new(2, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        week2.days.sat.push(easy("b", 10.0));
        week2.days.sat.push(easy("c", 3.0));
        week2.recompute_total();

        TrainingPlan {
            weeks: vec![week1, week2],
        }
    }

    fn ids(plan: &TrainingPlan, week: u32, day: Day) -> Vec<String> {
        plan.week(week)
            .unwrap()
            .days
            .get(day)
            .iter()
            .map(|w| w.id.clone())
            .collect()
    }

    #[test]
    fn test_update_distance_recomputes_total() {
        let plan = sample_plan();
        let updated = editor().update_distance(&plan, WorkoutLocation::new(2, Day::Sat, 1), 7.4);

        assert_eq!(updated.week(2).unwrap().weekly_total, 17);
        assert_eq!(updated.week(2).unwrap().days.sat[1].distance, 7.4);
        // input untouched
        assert_eq!(plan.week(2).unwrap().weekly_total, 13);
    }

    #[test]
    fn test_update_distance_coerces_invalid_values() {
        let plan = sample_plan();
        let at = WorkoutLocation::new(1, Day::Mon, 0);

        let negative = editor().update_distance(&plan, at, -4.0);
        assert_eq!(negative.workout(at).unwrap().distance, 0.0);
        assert_eq!(negative.week(1).unwrap().weekly_total, 0);

        let nan = editor().update_distance(&plan, at, f64::NAN);
        assert_eq!(nan.workout(at).unwrap().distance, 0.0);
    }

    #[test]
    fn test_update_distance_out_of_range_is_noop() {
        let plan = sample_plan();
        let editor = editor();

        assert_eq!(editor.update_distance(&plan, WorkoutLocation::new(1, Day::Mon, 1), 9.0), plan);
        assert_eq!(editor.update_distance(&plan, WorkoutLocation::new(1, Day::Tue, 0), 9.0), plan);
        assert_eq!(editor.update_distance(&plan, WorkoutLocation::new(9, Day::Mon, 0), 9.0), plan);
        assert_eq!(
            editor.try_update_distance(&plan, WorkoutLocation::new(9, Day::Mon, 0), 9.0),
            Err(EditError::WeekNotFound(9))
        );
    }

    #[test]
    fn test_update_nickname() {
        let plan = sample_plan();
        let at = WorkoutLocation::new(1, Day::Mon, 0);
        let editor = editor();

        let named = editor.update_nickname(&plan, at, "Shakeout");
        assert_eq!(named.workout(at).unwrap().nickname.as_deref(), Some("Shakeout"));
        assert_eq!(named.week(1).unwrap().weekly_total, 5);

        let cleared = editor.update_nickname(&named, at, "");
        assert_eq!(cleared.workout(at).unwrap().nickname, None);
    }

    #[test]
    fn test_add_strength_keeps_total() {
        let plan = sample_plan();
        let updated = editor().add_workout(&plan, 1, Day::Mon, WorkoutType::Strength, None);

        let mon = &updated.week(1).unwrap().days.mon;
        assert_eq!(mon.len(), 2);
        assert_eq!(mon[1].workout_type, WorkoutType::Strength);
        assert_eq!(mon[1].distance, 0.0);
        assert_eq!(updated.week(1).unwrap().weekly_total, 5);
    }

    #[test]
    fn test_add_run_uses_baseline_distance() {
        let plan = sample_plan();
        let mut editor = editor();
        let updated =
            editor.add_workout(&plan, 2, Day::Sun, WorkoutType::Tempo, Some("Hills".into()));

        let sun = &updated.week(2).unwrap().days.sun;
        assert_eq!(sun[0].distance, 5.0);
        assert_eq!(sun[0].id, "edit-1");
        assert_eq!(sun[0].nickname.as_deref(), Some("Hills"));
        assert_eq!(updated.week(2).unwrap().weekly_total, 18);
    }

    #[test]
    fn test_add_rejects_rest_and_unknown_week() {
        let plan = sample_plan();
        let mut editor = editor();

        assert_eq!(
            editor.try_add_workout(&plan, 1, Day::Tue, WorkoutType::Rest, None),
            Err(EditError::RestNotSchedulable)
        );
        assert_eq!(editor.add_workout(&plan, 3, Day::Tue, WorkoutType::Easy, None), plan);
    }

    #[test]
    fn test_remove_workout_reindexes() {
        let plan = sample_plan();
        let updated = editor().remove_workout(&plan, WorkoutLocation::new(2, Day::Sat, 0));

        assert_eq!(ids(&updated, 2, Day::Sat), vec!["c"]);
        assert_eq!(updated.week(2).unwrap().weekly_total, 3);
        assert_eq!(editor().remove_workout(&plan, WorkoutLocation::new(2, Day::Sat, 2)), plan);
    }

    #[test]
    fn test_move_within_week_keeps_total() {
        let plan = sample_plan();
        let updated = editor().move_workout(
            &plan,
            WorkoutLocation::new(1, Day::Mon, 0),
            WorkoutLocation::new(1, Day::Tue, 0),
        );

        let week = updated.week(1).unwrap();
        assert!(week.days.mon.is_empty());
        assert_eq!(ids(&updated, 1, Day::Tue), vec!["a"]);
        assert_eq!(week.weekly_total, 5);
    }

    #[test]
    fn test_move_across_weeks() {
        let plan = sample_plan();
        let updated = editor().move_workout(
            &plan,
            WorkoutLocation::new(2, Day::Sat, 0),
            WorkoutLocation::new(1, Day::Mon, 1),
        );

        assert_eq!(ids(&updated, 1, Day::Mon), vec!["a", "b"]);
        assert_eq!(ids(&updated, 2, Day::Sat), vec!["c"]);
        assert_eq!(updated.week(1).unwrap().weekly_total, 15);
        assert_eq!(updated.week(2).unwrap().weekly_total, 3);
        assert_eq!(updated.workout_count(), plan.workout_count());
        assert_eq!(updated.total_distance(), plan.total_distance());
    }

    #[test]
    fn test_reorder_within_day() {
        let plan = sample_plan();
        let updated = editor().move_workout(
            &plan,
            WorkoutLocation::new(2, Day::Sat, 0),
            WorkoutLocation::new(2, Day::Sat, 1),
        );

        assert_eq!(ids(&updated, 2, Day::Sat), vec!["c", "b"]);
        assert_eq!(updated.week(2).unwrap().weekly_total, 13);
    }

    #[test]
    fn test_move_preserves_identity() {
        let plan = sample_plan();
        let named =
            editor().update_nickname(&plan, WorkoutLocation::new(2, Day::Sat, 1), "Cooldown");
        let moved = editor().move_workout(
            &named,
            WorkoutLocation::new(2, Day::Sat, 1),
            WorkoutLocation::new(1, Day::Fri, 0),
        );

        let workout = moved.workout(WorkoutLocation::new(1, Day::Fri, 0)).unwrap();
        assert_eq!(workout.id, "c");
        assert_eq!(workout.distance, 3.0);
        assert_eq!(workout.nickname.as_deref(), Some("Cooldown"));
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let plan = sample_plan();
        let editor = editor();

        // Same day: only one slot remains after removal, so index 2 is past the end
        assert_eq!(
            editor.try_move_workout(
                &plan,
                WorkoutLocation::new(2, Day::Sat, 0),
                WorkoutLocation::new(2, Day::Sat, 2),
            ),
            Err(EditError::InsertOutOfRange {
                week: 2,
                day: Day::Sat,
                index: 2,
                len: 1
            })
        );
        assert_eq!(
            editor.move_workout(
                &plan,
                WorkoutLocation::new(1, Day::Mon, 0),
                WorkoutLocation::new(5, Day::Mon, 0),
            ),
            plan
        );
        assert_eq!(
            editor.move_workout(
                &plan,
                WorkoutLocation::new(1, Day::Wed, 0),
                WorkoutLocation::new(1, Day::Mon, 0),
            ),
            plan
        );
    }

    #[test]
    fn test_coerce_distance() {
        assert_eq!(coerce_distance("12.5"), 12.5);
        assert_eq!(coerce_distance(" 8 "), 8.0);
        assert_eq!(coerce_distance(""), 0.0);
        assert_eq!(coerce_distance("abc"), 0.0);
        assert_eq!(coerce_distance("-3"), 0.0);
        assert_eq!(coerce_distance("inf"), 0.0);
    }

    #[test]
    fn test_recompute_totals_repairs_stale_plan() {
        let mut plan = sample_plan();
        plan.weeks[1].weekly_total = 99;
        assert!(!plan.is_consistent());

        let repaired = recompute_totals(&plan);
        assert!(repaired.is_consistent());
        assert_eq!(repaired.week(2).unwrap().weekly_total, 13);
    }
}
