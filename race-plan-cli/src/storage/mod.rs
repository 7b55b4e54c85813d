// Local storage of the last goal and the last plan as JSON files
// Each save replaces the whole file, last write wins

use anyhow::{Context, Result};
use race_plan::{GoalInputs, TrainingPlan};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const GOAL_FILE: &str = "training-form-values.json";
pub const PLAN_FILE: &str = "training-plan.json";

/// Storage manager for the plan data directory
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Get data directory path (~/.race-plan/)
    pub fn data_dir() -> Result<PathBuf> {
        // Check for override environment variable first
        if let Ok(dir) = std::env::var("RACE_PLAN_DATA_DIR") {
            return Ok(PathBuf::from(dir));
        }

        crate::config::Config::config_dir()
    }

    /// Initialize storage in the default data directory
    pub fn init() -> Result<Self> {
        Self::open(Self::data_dir()?)
    }

    /// Initialize storage in a given directory, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        tracing::debug!("Using data directory {:?}", dir);

        fs::create_dir_all(&dir).context("Failed to create data directory")?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_goal(&self, goal: &GoalInputs) -> Result<()> {
        self.write_json(GOAL_FILE, goal)
    }

    pub fn load_goal(&self) -> Result<Option<GoalInputs>> {
        self.read_json(GOAL_FILE)
    }

    pub fn save_plan(&self, plan: &TrainingPlan) -> Result<()> {
        self.write_json(PLAN_FILE, plan)
    }

    pub fn load_plan(&self) -> Result<Option<TrainingPlan>> {
        self.read_json(PLAN_FILE)
    }

    /// Remove both the stored goal and the stored plan
    pub fn clear(&self) -> Result<()> {
        for name in [GOAL_FILE, PLAN_FILE] {
            match fs::remove_file(self.dir.join(name)) {
                Ok(()) => tracing::debug!("Removed {}", name),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e).with_context(|| format!("Failed to remove {}", name)),
            }
        }

        Ok(())
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let contents = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", name))?;

        fs::write(self.dir.join(name), contents)
            .with_context(|| format!("Failed to write {}", name))?;

        tracing::debug!("Saved {}", name);
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let contents = match fs::read_to_string(self.dir.join(name)) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", name)),
        };

        let value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", name))?;

        Ok(Some(value))
    }
}
