//! Configuration for the WTY2001 exporter.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete exporter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Upstream controller settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// The WTY2001 HTTP API endpoint.
    #[serde(default = "default_target")]
    pub target: String,

    /// File to read a mock response from. Empty means live HTTP.
    #[serde(default)]
    pub mock: String,
}

fn default_target() -> String {
    "http://127.0.0.1:12380/cgi-bin/index.cgi?p=dataget".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            mock: String::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl ExporterConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ExporterConfig = json5::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ExporterConfig = json5::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The target is only dialed when no mock file is configured.
        if self.upstream.mock.is_empty() && self.upstream.target.parse::<reqwest::Url>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid target URL: {}",
                self.upstream.target
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let json = "{}";
        let config = ExporterConfig::parse(json).unwrap();

        assert_eq!(
            config.upstream.target,
            "http://127.0.0.1:12380/cgi-bin/index.cgi?p=dataget"
        );
        assert_eq!(config.upstream.mock, "");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            upstream: {
                target: "http://192.168.1.50:12380/cgi-bin/index.cgi?p=dataget",
                mock: "/var/lib/wty2001/mock.txt"
            },
            logging: {
                level: "debug",
                format: "json"
            }
        }"#;

        let config = ExporterConfig::parse(json).unwrap();

        assert_eq!(
            config.upstream.target,
            "http://192.168.1.50:12380/cgi-bin/index.cgi?p=dataget"
        );
        assert_eq!(config.upstream.mock, "/var/lib/wty2001/mock.txt");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_invalid_target() {
        let json = r#"{
            upstream: { target: "not a url" }
        }"#;

        let result = ExporterConfig::parse(json);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid target URL")
        );
    }

    #[test]
    fn test_validate_skips_target_when_mock_set() {
        // With a mock file the target is never dialed, so it may be garbage.
        let json = r#"{
            upstream: { target: "not a url", mock: "/tmp/mock.txt" }
        }"#;

        assert!(ExporterConfig::parse(json).is_ok());
    }
}
