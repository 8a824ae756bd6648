use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_typing_delay_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_file_log_level() -> String {
    "debug".to_string()
}

/// Root configuration structure for greencheck.toml
///
/// The script library is compiled in and not configurable; the config covers
/// presentation knobs and the logging setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Simulated typing delay in milliseconds before a bot reply lands
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging section of greencheck.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default log level filter (like RUST_LOG)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: pretty, json, compact
    #[serde(default = "default_log_format")]
    pub format: String,

    /// File logging configuration
    #[serde(default)]
    pub file: FileLoggingConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: FileLoggingConfig::default(),
        }
    }
}

/// File logging subsection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    /// Enable logging to greencheck.log in the working directory
    #[serde(default)]
    pub enabled: bool,

    /// Log level for the file output
    #[serde(default = "default_file_log_level")]
    pub level: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: default_file_log_level() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { typing_delay_ms: default_typing_delay_ms(), logging: LoggingConfig::default() }
    }
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(toml_str).map_err(|e| Error::Config(format!("TOML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The typing delay as a [`Duration`]
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.typing_delay_ms > 60_000 {
            return Err(Error::Config(format!(
                "typing_delay_ms {} is longer than a minute",
                self.typing_delay_ms
            )));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" | "compact" => Ok(()),
            other => Err(Error::Config(format!("unknown log format: {}", other))),
        }
    }

    /// Example configuration written when no greencheck.toml exists
    pub fn example() -> &'static str {
        r#"# GreenCheck configuration

# Simulated typing delay before each bot reply, in milliseconds.
typing_delay_ms = 1000

[logging]
level = "warn"
format = "pretty"

[logging.file]
enabled = false
level = "debug"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.typing_delay_ms, 1000);
        assert_eq!(config.typing_delay(), Duration::from_millis(1000));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
        assert!(!config.logging.file.enabled);
    }

    #[test]
    fn test_example_parses() {
        let config = Config::from_toml_str(Config::example()).unwrap();
        assert_eq!(config.typing_delay_ms, 1000);
    }

    #[test]
    fn test_from_toml_str_overrides() {
        let config = Config::from_toml_str(
            r#"
typing_delay_ms = 250

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.typing_delay(), Duration::from_millis(250));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_from_toml_str_empty_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.typing_delay_ms, 1000);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml_str("not valid toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::from_toml_str("scripts_path = \"/tmp/scripts\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let result = Config::from_toml_str("[logging]\nformat = \"xml\"");
        assert!(result.unwrap_err().to_string().contains("unknown log format"));
    }

    #[test]
    fn test_excessive_delay_rejected() {
        let result = Config::from_toml_str("typing_delay_ms = 120000");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("greencheck.toml");
        std::fs::write(&path, Config::example()).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.typing_delay_ms, 1000);
    }

    #[test]
    fn test_from_file_missing() {
        let temp = TempDir::new().unwrap();
        let result = Config::from_file(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
