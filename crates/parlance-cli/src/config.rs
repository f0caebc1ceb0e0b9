//! Configuration management for the Parlance CLI.

use anyhow::{Context, Result};
use parlance::prelude::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "parlance.toml";

/// Parlance project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub batch: BatchSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Print the vocabulary every N ticks; 0 disables.
    #[serde(default = "default_report_every")]
    pub report_every: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSettings {
    #[serde(default = "default_runs")]
    pub runs: u64,
    #[serde(default = "default_batch_ticks")]
    pub ticks: u64,
}

// Default value functions
fn default_ticks() -> u64 { 500 }
fn default_report_every() -> u64 { 50 }
fn default_runs() -> u64 { 10 }
fn default_batch_ticks() -> u64 { 1000 }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            report_every: default_report_every(),
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            ticks: default_batch_ticks(),
        }
    }
}

impl Config {
    /// Load config from parlance.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::load_from_dir(&cwd)
    }

    /// Load config found at or above `dir`, or the defaults if there is none.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        match find_config_file(dir) {
            Some(path) => Self::load_file(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load a specific config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find parlance.toml in `start` or its parent directories.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.run.report_every, 50);
    }

    #[test]
    fn saved_config_is_found_from_a_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.simulation.population_size = 20;
        config.simulation.wrap = true;
        config.run.ticks = 77;
        config.save(&dir.path().join(CONFIG_FILE)).unwrap();

        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let loaded = Config::load_from_dir(&nested).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[simulation]\nalpha = 0.3\n\n[run]\nticks = 10\n").unwrap();

        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.simulation.alpha, 0.3);
        assert_eq!(config.simulation.population_size, 5);
        assert_eq!(config.run.ticks, 10);
        assert_eq!(config.run.report_every, 50);
        assert_eq!(config.batch, BatchSettings::default());
    }

    #[test]
    fn malformed_file_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[simulation\n").unwrap();
        let err = Config::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
