// Plan generation and calendar editing

pub mod id_source;
pub mod plan_editing_service;
pub mod plan_generation_service;

pub use id_source::{IdSource, SequentialIds, UuidIds};
pub use plan_editing_service::{coerce_distance, recompute_totals, PlanEditingService};
pub use plan_generation_service::{generate_plan, span_weeks, week_start, PlanGenerationService};
