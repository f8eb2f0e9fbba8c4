//! Configuration file handling for ~/.ebula/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::{MAX_TICK_STEP_SECS, MIN_TICK_INTERVAL_MS};
use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.ebula/config.ini).
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the defaults. Values present in the file are
    /// overlaid on them and the result is validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config = super::parser::parse_ini(&Ini::load_from_file(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the `[drive]` tick settings against their bounds.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        let drive = &self.drive;
        if drive.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(out_of_range(
                "tick_interval_ms",
                drive.tick_interval_ms,
                format!("must be at least {}", MIN_TICK_INTERVAL_MS),
            ));
        }
        if !(1..=MAX_TICK_STEP_SECS).contains(&drive.tick_step_secs) {
            return Err(out_of_range(
                "tick_step_secs",
                drive.tick_step_secs,
                format!("must be between 1 and {}", MAX_TICK_STEP_SECS),
            ));
        }
        Ok(())
    }

    /// Save configuration to the default path (~/.ebula/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    ///
    /// Settings that would fail [`validate`](Self::validate) are not written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        std::fs::write(path, self.to_config_string())
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// The commented INI text [`save_to`](Self::save_to) would write.
    pub fn to_config_string(&self) -> String {
        super::writer::to_config_string(self)
    }
}

fn out_of_range(key: &str, value: impl ToString, reason: String) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: "drive".to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason,
    }
}

/// Get the path to the config directory (~/.ebula).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ebula")
}

/// Get the path to the config file (~/.ebula/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.drive.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(config.drive.tick_step_secs, DEFAULT_TICK_STEP_SECS);
        assert!(config.drive.auto_scroll);
        assert!(!config.logging.debug);
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        ConfigFile::default().save_to(&config_path).unwrap();
        assert!(config_path.exists());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(ConfigFile::default().validate().is_ok());
    }

    #[test]
    fn test_save_rejects_out_of_range_tick() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.drive.tick_step_secs = 0;
        let err = config.save_to(&config_path).unwrap_err();

        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref key, .. } if key == "tick_step_secs"
        ));
        assert!(!config_path.exists());
    }

    #[test]
    fn test_saved_config_loads_back() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.drive.tick_interval_ms = MIN_TICK_INTERVAL_MS;
        config.drive.tick_step_secs = MAX_TICK_STEP_SECS;
        config.save_to(&config_path).unwrap();

        assert_eq!(ConfigFile::load_from(&config_path).unwrap().drive, config.drive);
    }

    #[test]
    fn test_config_paths() {
        assert!(config_file_path().ends_with(".ebula/config.ini"));
        assert!(config_file_path().starts_with(config_directory()));
    }
}
