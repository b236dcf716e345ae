//! Configuration management for the dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DashboardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Advisory collaborator configuration
    pub advisory: AdvisoryConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Fixture source configuration
    pub fixtures: FixturesConfig,
}

/// Advisory generation and publication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Simulated generation latency in milliseconds
    pub generate_delay_ms: u64,
    /// Simulated publication latency in milliseconds
    pub publish_delay_ms: u64,
    /// Upper bound for any single advisory call in milliseconds
    pub timeout_ms: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// Where the dashboard data comes from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    /// JSON fixture document; the built-in data set is used when absent
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_generate_delay() -> u64 {
    2000
}

fn default_publish_delay() -> u64 {
    1500
}

fn default_advisory_timeout() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const MAX_ADVISORY_MS: u64 = 60_000;

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            generate_delay_ms: default_generate_delay(),
            publish_delay_ms: default_publish_delay(),
            timeout_ms: default_advisory_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // DASHBOARD_ADVISORY__TIMEOUT_MS=5000 overrides advisory.timeout_ms
        builder = builder.add_source(
            Environment::with_prefix("DASHBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aviation-dashboard").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.advisory.timeout_ms == 0 {
            self.advisory.timeout_ms = default_advisory_timeout();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        let advisory = &self.advisory;
        if advisory.timeout_ms == 0 {
            return Err(DashboardError::config("Advisory timeout must be greater than zero").into());
        }

        for (name, value) in [
            ("generate delay", advisory.generate_delay_ms),
            ("publish delay", advisory.publish_delay_ms),
            ("timeout", advisory.timeout_ms),
        ] {
            if value > MAX_ADVISORY_MS {
                return Err(DashboardError::config(format!(
                    "Advisory {name} cannot exceed {MAX_ADVISORY_MS} ms"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.advisory.generate_delay_ms, 2000);
        assert_eq!(config.advisory.publish_delay_ms, 1500);
        assert_eq!(config.advisory.timeout_ms, 10_000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.fixtures.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_log_format() {
        let mut config = DashboardConfig::default();
        config.logging.format = "xml".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = DashboardConfig::default();
        config.advisory.publish_delay_ms = 120_000;
        let result = config.validate();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("publish delay cannot exceed")
        );
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = DashboardConfig::default();
        config.logging.level.clear();
        config.advisory.timeout_ms = 0;
        config.apply_defaults();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.advisory.timeout_ms, 10_000);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            "[advisory]\ngenerate_delay_ms = 50\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config =
            DashboardConfig::load_from_path(Some(temp_file.path().to_path_buf())).unwrap();
        assert_eq!(config.advisory.generate_delay_ms, 50);
        assert_eq!(config.advisory.publish_delay_ms, 1500);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = DashboardConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("aviation-dashboard"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
