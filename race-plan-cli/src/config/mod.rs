use anyhow::{Context, Result};
use race_plan::PlanConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::{ExportFormat, ExportOptions, Orientation, DEFAULT_TITLE};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub plan: PlanConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub orientation: Orientation,

    #[serde(default = "default_header_color")]
    pub header_color: String,

    #[serde(default)]
    pub format: ExportFormat,
}

// Default value functions
fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_header_color() -> String {
    "cyan".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            orientation: Orientation::default(),
            header_color: default_header_color(),
            format: ExportFormat::default(),
        }
    }
}

impl ExportConfig {
    pub fn to_options(&self) -> ExportOptions {
        ExportOptions {
            title: self.title.clone(),
            orientation: self.orientation,
            header_color: self.header_color.clone(),
            format: self.format,
            color: true,
        }
    }
}

impl Config {
    /// Get config directory path (~/.race-plan/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".race-plan"))
    }

    /// Get config file path (~/.race-plan/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve an explicit `--config` path or fall back to the default location
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_file = Self::resolve_path(path)?;

        if !config_file.exists() {
            tracing::debug!("Config file {:?} not found, using defaults", config_file);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_file = Self::resolve_path(path)?;
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(config_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.title, "Your Training Plan");
        assert_eq!(config.export.orientation, Orientation::Landscape);
        assert_eq!(config.export.format, ExportFormat::Text);
        assert_eq!(config.plan.max_weeks, 52);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [export]
            orientation = "portrait"

            [plan]
            taper_weeks = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.export.orientation, Orientation::Portrait);
        assert_eq!(config.export.header_color, "cyan");
        assert_eq!(config.plan.taper_weeks, 3);
        assert_eq!(config.plan.max_weeks, 52);
    }

    #[test]
    fn test_save_and_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.export.title = "Spring Marathon".to_string();
        let written = config.save(Some(&path)).unwrap();

        assert_eq!(written, path);
        assert_eq!(Config::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }
}
