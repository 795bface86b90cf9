//! Configuration loader
//!
//! Reads a [`FanoutConfig`] from a YAML file. `load_from_path` treats a
//! missing file as absent optional config and yields the defaults;
//! `load_required` is for paths the user named and rejects a missing file.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::FanoutConfig;
use crate::error::{EventError, Result};

/// Loads channel configuration from YAML
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file path
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file exists but cannot be read, and
    /// `InvalidConfiguration` if it does not contain valid configuration.
    pub fn load_from_path(path: &Path) -> Result<FanoutConfig> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(FanoutConfig::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse_yaml(&content)?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Load configuration from a file that must exist
    ///
    /// Used for paths named explicitly by the user, where a missing file is
    /// a mistake rather than an absent optional config.
    ///
    /// # Errors
    ///
    /// Returns `IoError` with `NotFound` if the file does not exist, plus the
    /// errors of [`load_from_path`](Self::load_from_path).
    pub fn load_required(path: &Path) -> Result<FanoutConfig> {
        if !path.exists() {
            return Err(EventError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Config file not found: {}", path.display()),
            )));
        }

        Self::load_from_path(path)
    }

    /// Parse YAML configuration content
    ///
    /// Empty content yields the default configuration.
    pub fn parse_yaml(content: &str) -> Result<FanoutConfig> {
        if content.trim().is_empty() {
            return Ok(FanoutConfig::default());
        }

        let config: FanoutConfig = serde_yaml::from_str(content)
            .map_err(|e| EventError::InvalidConfiguration(format!("Invalid YAML: {}", e)))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize a configuration back to YAML
    pub fn to_yaml(config: &FanoutConfig) -> Result<String> {
        Ok(serde_yaml::to_string(config)?)
    }

    fn validate(config: &FanoutConfig) -> Result<()> {
        match config.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(EventError::InvalidConfiguration(format!(
                "Unknown log level: {}",
                other
            ))),
        }
    }
}
