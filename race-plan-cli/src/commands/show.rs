use anyhow::{Context, Result};
use clap::Args;
use race_plan::TrainingPlan;

use crate::config::Config;
use crate::export::{self, ExportFormat, Orientation};
use crate::storage::Storage;

#[derive(Args)]
pub struct ShowCommand {
    /// Only show this week
    #[arg(short, long)]
    week: Option<u32>,

    /// Layout of the table (defaults to the configured orientation)
    #[arg(short, long, value_enum)]
    orientation: Option<Orientation>,
}

impl ShowCommand {
    pub fn execute(self, config: &Config, storage: &Storage) -> Result<()> {
        let plan = super::load_plan(storage)?;
        let orientation = self.orientation.unwrap_or(config.export.orientation);

        match self.week {
            Some(number) => {
                let week = plan
                    .week(number)
                    .with_context(|| format!("Week {} is not part of the plan", number))?;
                print_plan(
                    &TrainingPlan {
                        weeks: vec![week.clone()],
                    },
                    config,
                    orientation,
                )
            }
            None => {
                print_plan(&plan, config, orientation)?;
                println!();
                println!(
                    "{} weeks, {} km in total",
                    plan.weeks.len(),
                    plan.total_distance()
                );
                Ok(())
            }
        }
    }
}

/// Print a plan as a terminal table
pub(super) fn print_plan(
    plan: &TrainingPlan,
    config: &Config,
    orientation: Orientation,
) -> Result<()> {
    let mut options = config.export.to_options();
    options.format = ExportFormat::Text;
    options.orientation = orientation;

    print!("{}", export::render(plan, &options)?);
    Ok(())
}
