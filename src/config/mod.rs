use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_CUSTOM_DISTANCE;

/// Tuning for plan generation and editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Hard cap on generated weeks
    #[serde(default = "default_max_weeks")]
    pub max_weeks: u32,

    /// Plans shorter than this use the flat short-plan fractions
    #[serde(default = "default_short_plan_weeks")]
    pub short_plan_weeks: u32,

    /// Number of reduced-volume weeks before the race
    #[serde(default = "default_taper_weeks")]
    pub taper_weeks: u32,

    /// Target used when a custom race distance is unusable (km)
    #[serde(default = "default_custom_distance")]
    pub default_custom_distance: f64,

    /// Distance of a non-strength workout added by hand (km)
    #[serde(default = "default_added_workout_distance")]
    pub added_workout_distance: f64,
}

// Default value functions
fn default_max_weeks() -> u32 {
    52
}

fn default_short_plan_weeks() -> u32 {
    3
}

fn default_taper_weeks() -> u32 {
    2
}

fn default_custom_distance() -> f64 {
    DEFAULT_CUSTOM_DISTANCE
}

fn default_added_workout_distance() -> f64 {
    5.0
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            max_weeks: default_max_weeks(),
            short_plan_weeks: default_short_plan_weeks(),
            taper_weeks: default_taper_weeks(),
            default_custom_distance: default_custom_distance(),
            added_workout_distance: default_added_workout_distance(),
        }
    }
}
