//! Configuration management for pettrackr
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/pettrackr/config.toml

use crate::billing::FeeSchedule;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MIN_GRID_COLUMNS: u16 = 1;
pub const MAX_GRID_COLUMNS: u16 = 6;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    /// Cards per row in the pets grid
    pub grid_columns: u16,
    /// Where the database, images and log live. Defaults to the
    /// platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub fees: FeeSchedule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::Gruvbox,
            grid_columns: 4,
            data_dir: None,
            log_level: "info".to_string(),
            fees: FeeSchedule::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("pettrackr");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        config.grid_columns = config.grid_columns.clamp(MIN_GRID_COLUMNS, MAX_GRID_COLUMNS);
        Ok(config)
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Configured data directory, or the platform default
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::data_dir()
                .context("Could not determine data directory")?
                .join("pettrackr")),
        }
    }

    /// Cycle the grid width through 1..=6
    pub fn next_grid_columns(&mut self) {
        self.grid_columns = if self.grid_columns >= MAX_GRID_COLUMNS {
            MIN_GRID_COLUMNS
        } else {
            self.grid_columns + 1
        };
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Gruvbox,
    Nord,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Gruvbox => "Gruvbox",
            ThemeName::Nord => "Nord",
            ThemeName::Transparent => "Transparent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Gruvbox => ThemeName::Nord,
            ThemeName::Nord => ThemeName::Transparent,
            ThemeName::Transparent => ThemeName::Gruvbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeName::Gruvbox);
        assert_eq!(config.grid_columns, 4);
        assert_eq!(config.fees.base_per_day, 350);
    }

    #[test]
    fn test_load_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.is_file());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = \"nord\"\ngrid_columns = 40\n[fees]\ntwice = 200\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, ThemeName::Nord);
        assert_eq!(config.grid_columns, MAX_GRID_COLUMNS);
        assert_eq!(config.fees.twice, 200);
        assert_eq!(config.fees.once, 85);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.theme = config.theme.next();
        config.data_dir = Some(dir.path().join("data"));
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_grid_and_theme_cycle() {
        let mut config = Config::default();
        config.grid_columns = MAX_GRID_COLUMNS;
        config.next_grid_columns();
        assert_eq!(config.grid_columns, MIN_GRID_COLUMNS);

        let theme = ThemeName::Gruvbox;
        assert_eq!(theme.next().next().next(), ThemeName::Gruvbox);
    }
}
