//! Configuration management module.

use crate::models::{Employee, Shift};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
///
/// Carries processing knobs plus the shift and employee master data the CLI
/// runs against (a server deployment would load these from its own storage).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// Processing run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Generate occurrence candidates while processing (default: true).
    #[serde(default = "default_true")]
    pub generate_occurrences: bool,
    /// Raise weekend-work occurrences (default: true).
    #[serde(default = "default_true")]
    pub consider_weekends: bool,
    /// Raise holiday-work occurrences (default: true).
    #[serde(default = "default_true")]
    pub consider_holidays: bool,
    /// Company holidays, `YYYY-MM-DD`.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

fn default_true() -> bool {
    true
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            generate_occurrences: true,
            consider_weekends: true,
            consider_holidays: true,
            holidays: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Get config file path (platform config directory, falling back to the
    /// current directory).
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "ponto-attendance")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for shift in &self.shifts {
            shift
                .validate()
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }

        for employee in &self.employees {
            if employee.id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Employee id cannot be empty".to_string(),
                ));
            }
            if let Some(shift_id) = &employee.shift_id
                && !self.shifts.iter().any(|s| &s.name == shift_id)
            {
                return Err(ConfigError::Validation(format!(
                    "Employee '{}' references unknown shift '{}'",
                    employee.id, shift_id
                )));
            }
        }

        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
