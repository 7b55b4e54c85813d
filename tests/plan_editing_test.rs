mod common;

use assert_matches::assert_matches;
use common::{date, editor, generate, generate_with_editor, standard_goal, training_day};
use pretty_assertions::assert_eq;
use race_plan::models::{Day, GoalInputs, TrainingPlan, WorkoutLocation, WorkoutType};
use race_plan::services::recompute_totals;
use race_plan::EditError;
use std::collections::HashSet;

/// Monday easy runs only, 20 km race on a Sunday eight weeks out
fn easy_monday_plan() -> TrainingPlan {
    let mut goal: GoalInputs = standard_goal(date(2024, 1, 1), date(2024, 2, 25));
    goal.race_distance = race_plan::RaceDistance::Custom;
    goal.custom_race_distance = Some(20.0);
    goal.training_days = vec![training_day(Day::Mon, &[WorkoutType::Easy])];
    generate(&goal)
}

#[test]
fn test_add_strength_leaves_total_unchanged() {
    let plan = easy_monday_plan();
    let before = plan.week(1).unwrap().weekly_total;

    let updated = editor().add_workout(&plan, 1, Day::Mon, WorkoutType::Strength, None);
    let week = updated.week(1).unwrap();

    assert_eq!(week.days.mon.len(), 2);
    assert_eq!(week.days.mon[1].workout_type, WorkoutType::Strength);
    assert_eq!(week.days.mon[1].distance, 0.0);
    assert_eq!(week.weekly_total, before);
}

#[test]
fn test_move_monday_run_to_tuesday() {
    let plan = easy_monday_plan();
    let week_before = plan.week(1).unwrap();
    // 25% of 20 km
    assert_eq!(week_before.days.mon[0].distance, 5.0);
    assert_eq!(week_before.weekly_total, 5);

    let updated = editor().move_workout(
        &plan,
        WorkoutLocation::new(1, Day::Mon, 0),
        WorkoutLocation::new(1, Day::Tue, 0),
    );
    let week = updated.week(1).unwrap();

    assert!(week.days.mon.is_empty());
    assert_eq!(week.days.tue.len(), 1);
    assert_eq!(week.days.tue[0].id, week_before.days.mon[0].id);
    assert_eq!(week.weekly_total, 5);
}

#[test]
fn test_edits_never_leave_stale_totals() {
    let plan = generate(&standard_goal(date(2024, 1, 1), date(2024, 3, 10)));
    let mut editor = editor();

    let plan = editor.update_distance(&plan, WorkoutLocation::new(3, Day::Sun, 0), 14.6);
    assert!(plan.is_consistent());
    let plan = editor.add_workout(&plan, 3, Day::Sat, WorkoutType::Easy, Some("Shakeout".into()));
    assert!(plan.is_consistent());
    let plan = editor.remove_workout(&plan, WorkoutLocation::new(3, Day::Wed, 0));
    assert!(plan.is_consistent());
    let plan = editor.move_workout(
        &plan,
        WorkoutLocation::new(3, Day::Sat, 0),
        WorkoutLocation::new(7, Day::Tue, 0),
    );
    assert!(plan.is_consistent());
    let plan = editor.update_nickname(&plan, WorkoutLocation::new(7, Day::Tue, 0), "Moved");
    assert!(plan.is_consistent());

    let moved = plan.workout(WorkoutLocation::new(7, Day::Tue, 0)).unwrap();
    assert_eq!(moved.nickname.as_deref(), Some("Moved"));
    assert_eq!(moved.distance, 5.0);
    assert_eq!(moved.id, "edit-1");
}

#[test]
fn test_cross_week_move_conserves_distance() {
    let plan = generate(&standard_goal(date(2024, 1, 1), date(2024, 3, 10)));
    let moved_distance = plan.workout(WorkoutLocation::new(5, Day::Sun, 0)).unwrap().distance;

    let updated = editor().move_workout(
        &plan,
        WorkoutLocation::new(5, Day::Sun, 0),
        WorkoutLocation::new(2, Day::Fri, 0),
    );

    let before = plan.week(2).unwrap().weekly_total + plan.week(5).unwrap().weekly_total;
    let after = updated.week(2).unwrap().weekly_total + updated.week(5).unwrap().weekly_total;
    assert_eq!(before, after);
    assert_eq!(
        updated.week(5).unwrap().weekly_total as f64,
        plan.week(5).unwrap().weekly_total as f64 - moved_distance
    );
    assert_eq!(updated.workout_count(), plan.workout_count());
}

#[test]
fn test_race_day_is_not_reapplied_after_edits() {
    let plan = generate(&standard_goal(date(2024, 1, 1), date(2024, 3, 10)));
    let race = WorkoutLocation::new(10, Day::Sun, 0);

    let updated = editor().remove_workout(&plan, race);
    let updated = editor().add_workout(&updated, 10, Day::Sun, WorkoutType::Easy, None);

    let sun = &updated.week(10).unwrap().days.sun;
    assert_eq!(sun.len(), 1);
    assert_eq!(sun[0].workout_type, WorkoutType::Easy);
}

#[test]
fn test_stale_addressing_reports_reason() {
    let plan = easy_monday_plan();
    let editor = editor();

    assert_eq!(
        editor.try_remove_workout(&plan, WorkoutLocation::new(1, Day::Mon, 3)),
        Err(EditError::WorkoutNotFound(WorkoutLocation::new(1, Day::Mon, 3)))
    );
    assert_eq!(
        editor.try_update_nickname(&plan, WorkoutLocation::new(0, Day::Mon, 0), "x"),
        Err(EditError::WeekNotFound(0))
    );
    assert_eq!(editor.remove_workout(&plan, WorkoutLocation::new(1, Day::Mon, 3)), plan);
}

#[test]
fn test_invalid_moves_and_adds_are_rejected() {
    let plan = easy_monday_plan();
    let mut editor = editor();

    assert_matches!(
        editor.try_move_workout(
            &plan,
            WorkoutLocation::new(1, Day::Mon, 0),
            WorkoutLocation::new(1, Day::Tue, 1),
        ),
        Err(EditError::InsertOutOfRange { week: 1, day: Day::Tue, index: 1, len: 0 })
    );
    assert_matches!(
        editor.try_move_workout(
            &plan,
            WorkoutLocation::new(1, Day::Mon, 0),
            WorkoutLocation::new(99, Day::Tue, 0),
        ),
        Err(EditError::WeekNotFound(99))
    );
    assert_matches!(
        editor.try_add_workout(&plan, 1, Day::Fri, WorkoutType::Rest, None),
        Err(EditError::RestNotSchedulable)
    );
    assert_matches!(
        editor.try_add_workout(&plan, 1, Day::Fri, WorkoutType::Tempo, None),
        Ok(updated) if updated.week(1).unwrap().weekly_total == 10
    );
}

#[test]
fn test_recompute_totals_on_hand_edited_plan() {
    let mut plan = easy_monday_plan();
    plan.weeks[0].days.mon[0].distance = 12.0;
    assert!(!plan.is_consistent());

    let repaired = recompute_totals(&plan);
    assert_eq!(repaired.week(1).unwrap().weekly_total, 12);
    assert!(repaired.is_consistent());
}

fn workout_ids(plan: &TrainingPlan) -> Vec<String> {
    plan.weeks
        .iter()
        .flat_map(|w| w.days.iter().flat_map(|(_, ws)| ws.iter()))
        .map(|w| w.id.clone())
        .collect()
}

#[test]
fn test_editor_continues_generator_ids() {
    let goal = standard_goal(date(2024, 1, 1), date(2024, 3, 10));
    let (plan, mut editor) = generate_with_editor(&goal);
    let generated = workout_ids(&plan);

    let updated = editor.add_workout(&plan, 1, Day::Sat, WorkoutType::Easy, None);
    let updated = editor.add_workout(&updated, 2, Day::Sat, WorkoutType::Easy, None);

    let added = &updated.week(1).unwrap().days.sat[0].id;
    assert!(added.starts_with("w-"));
    assert!(!generated.contains(added));

    let all = workout_ids(&updated);
    let unique: HashSet<&String> = all.iter().collect();
    assert_eq!(unique.len(), all.len());
}
