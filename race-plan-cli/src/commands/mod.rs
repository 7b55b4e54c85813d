mod config_cmd;
mod edit;
mod export_cmd;
mod generate;
mod reset;
mod show;
mod training_day_parser;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use race_plan::services::recompute_totals;
use race_plan::{Day, TrainingPlan, WorkoutLocation, WorkoutType};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::storage::Storage;

pub use export_cmd::ExportCommand;
pub use generate::GenerateCommand;
pub use reset::ResetCommand;
pub use show::ShowCommand;
pub use training_day_parser::parse_training_day;

#[derive(Parser)]
#[command(name = "race-plan")]
#[command(about = "Race training plan generator and editor", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "RACE_PLAN_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new plan from a race goal
    Generate(GenerateCommand),

    /// Show the stored plan
    Show(ShowCommand),

    /// Edit workouts in the stored plan
    #[command(subcommand)]
    Edit(EditSubcommands),

    /// Export the stored plan
    Export(ExportCommand),

    /// Remove the stored goal and plan
    Reset(ResetCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum EditSubcommands {
    /// Set the distance of a workout (km)
    Distance {
        /// Week number, starting at 1
        week: u32,
        /// Day of the week (Mon, tuesday, ...)
        day: Day,
        /// Workout position within the day, starting at 0
        index: usize,
        /// New distance; invalid or negative input becomes 0
        #[arg(allow_hyphen_values = true)]
        distance: String,
    },

    /// Rename a workout; an empty name clears it
    Nickname {
        week: u32,
        day: Day,
        index: usize,
        nickname: String,
    },

    /// Append a workout to a day
    Add {
        week: u32,
        day: Day,
        /// Workout type (easy, long, interval, tempo, race, strength)
        r#type: WorkoutType,

        /// Optional display name
        #[arg(short, long)]
        nickname: Option<String>,
    },

    /// Remove a workout
    Remove { week: u32, day: Day, index: usize },

    /// Move a workout to another day or week
    Move {
        week: u32,
        day: Day,
        index: usize,

        /// Destination day
        #[arg(long)]
        to_day: Day,

        /// Destination week (defaults to the source week)
        #[arg(long)]
        to_week: Option<u32>,

        /// Destination position (defaults to the end of the day)
        #[arg(long)]
        to_index: Option<usize>,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration file location
    Path,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config_path = self.config.as_deref();

        match self.command {
            Commands::Generate(cmd) => {
                let (config, storage) = open(config_path)?;
                cmd.execute(&config, &storage)
            }
            Commands::Show(cmd) => {
                let (config, storage) = open(config_path)?;
                cmd.execute(&config, &storage)
            }
            Commands::Edit(subcmd) => {
                let (config, storage) = open(config_path)?;
                run_edit(subcmd, &config, &storage)
            }
            Commands::Export(cmd) => {
                let (config, storage) = open(config_path)?;
                cmd.execute(&config, &storage)
            }
            Commands::Reset(cmd) => cmd.execute(&Storage::init()?),
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config_path),
                ConfigSubcommands::Init { force } => config_cmd::init_config(config_path, force),
                ConfigSubcommands::Path => config_cmd::print_path(config_path),
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn open(config_path: Option<&Path>) -> Result<(Config, Storage)> {
    Ok((Config::load(config_path)?, Storage::init()?))
}

fn run_edit(subcmd: EditSubcommands, config: &Config, storage: &Storage) -> Result<()> {
    match subcmd {
        EditSubcommands::Distance {
            week,
            day,
            index,
            distance,
        } => edit::update_distance(config, storage, week, day, index, &distance),
        EditSubcommands::Nickname {
            week,
            day,
            index,
            nickname,
        } => edit::update_nickname(config, storage, week, day, index, &nickname),
        EditSubcommands::Add {
            week,
            day,
            r#type,
            nickname,
        } => edit::add_workout(config, storage, week, day, r#type, nickname),
        EditSubcommands::Remove { week, day, index } => {
            edit::remove_workout(config, storage, week, day, index)
        }
        EditSubcommands::Move {
            week,
            day,
            index,
            to_day,
            to_week,
            to_index,
        } => edit::move_workout(
            config,
            storage,
            WorkoutLocation::new(week, day, index),
            (to_week.unwrap_or(week), to_day, to_index),
        ),
    }
}

/// Load the stored plan or explain how to create one.
///
/// Weekly totals are recomputed on the way in, so a hand-edited file never
/// carries stale totals into an edit or an export.
fn load_plan(storage: &Storage) -> Result<TrainingPlan> {
    let plan = storage
        .load_plan()?
        .context("No training plan found. Run `race-plan generate` first")?;

    let repaired = recompute_totals(&plan);
    if repaired != plan {
        let stale: Vec<u32> = plan
            .weeks
            .iter()
            .zip(&repaired.weeks)
            .filter(|(stored, fixed)| stored.weekly_total != fixed.weekly_total)
            .map(|(stored, _)| stored.week)
            .collect();
        tracing::debug!("Recomputed stale weekly totals for weeks {:?}", stale);
    }

    Ok(repaired)
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
