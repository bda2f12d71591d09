//! TOML-based application configuration.
//!
//! Stores the database filename and calendar defaults. Configuration lives
//! at `~/.config/cropcal/config.toml` and is created with defaults on first
//! load.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite filename inside the data directory.
    #[serde(default = "default_db_filename")]
    pub filename: String,
}

/// Calendar defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// User id events are attributed to when no user is given explicitly.
    #[serde(default = "default_user")]
    pub default_user: i64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/cropcal/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

// Default functions
fn default_db_filename() -> String {
    "cropcal.db".to_string()
}
fn default_user() -> i64 {
    1
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            filename: default_db_filename(),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_user: default_user(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            calendar: CalendarConfig::default(),
        }
    }
}

impl Config {
    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/cropcal"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, writing defaults when the file does not exist
    /// yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Write the configuration back to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("~/.config/cropcal/config.toml"),
            message: e.to_string(),
        })?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Absolute path of the SQLite database.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/cropcal"),
            message: e.to_string(),
        })?;
        Ok(dir.join(&self.database.filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_preserves_values() {
        let mut cfg = Config::default();
        cfg.database.filename = "test.db".to_string();
        cfg.calendar.default_user = 42;

        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.database.filename, "test.db");
        assert_eq!(parsed.calendar.default_user, 42);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.database.filename, "cropcal.db");
        assert_eq!(parsed.calendar.default_user, 1);

        let parsed: Config = toml::from_str("[calendar]\ndefault_user = 9\n").unwrap();
        assert_eq!(parsed.database.filename, "cropcal.db");
        assert_eq!(parsed.calendar.default_user, 9);
    }
}
