//! Logging bootstrap for GreenCheck.
//!
//! Built on the tracing ecosystem: an environment-driven filter, formatted
//! stderr output, and optional JSON file logging.
//!
//! # Environment Variables
//!
//! - `GREENCHECK_LOG`: filter directive (like `RUST_LOG`), e.g. `greencheck=debug`
//! - `GREENCHECK_LOG_FORMAT`: stderr format: `pretty`, `json`, `compact`
//! - `GREENCHECK_LOG_DIR`: override the file log directory (`~/.greencheck/logs`)
//!
//! While the TUI owns the terminal, stderr output is suppressed and only the
//! file layer (when enabled) receives events.

use std::env;
use std::io;
use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::Error;

/// Log output format for stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    /// All available log formats
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    /// Parse a log format from a string
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    /// Get the string representation of this format
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// Build an EnvFilter from config and environment variables
fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    let filter = env::var("GREENCHECK_LOG")
        .ok()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| config.level.clone());

    EnvFilter::new(filter)
}

/// Determine the stderr format from the environment, falling back to config
fn detect_format(config: &LoggingConfig) -> LogFormat {
    if let Ok(fmt_str) = env::var("GREENCHECK_LOG_FORMAT")
        && let Some(fmt) = LogFormat::parse_str(&fmt_str)
    {
        return fmt;
    }

    LogFormat::parse_str(&config.format).unwrap_or_default()
}

/// Get the file log directory
fn log_dir() -> Result<PathBuf, Error> {
    if let Ok(custom_dir) = env::var("GREENCHECK_LOG_DIR") {
        return Ok(PathBuf::from(custom_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map_err(|_| Error::Logging("could not determine home directory".to_string()))?;

    Ok(PathBuf::from(home).join(".greencheck").join("logs"))
}

/// Initialize the global tracing subscriber.
///
/// `tui_mode` suppresses the stderr layer (the terminal belongs to the UI);
/// events then only reach the file layer, when enabled.
pub fn init_logging(config: &LoggingConfig, tui_mode: bool) -> Result<(), Error> {
    let env_filter = build_env_filter(config);
    let format = detect_format(config);

    let registry = Registry::default().with(env_filter);

    let file_layer = if config.file.enabled {
        let dir = log_dir()?;
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::Logging(format!("failed to create log directory: {}", e)))?;
        let appender = tracing_appender::rolling::daily(dir, "greencheck.log");
        Some(fmt::layer().json().with_writer(appender))
    } else {
        None
    };

    if tui_mode {
        registry.with(file_layer).init();
        return Ok(());
    }

    match format {
        LogFormat::Pretty => registry
            .with(file_layer)
            .with(fmt::layer().pretty().with_writer(io::stderr).with_ansi(true))
            .init(),
        LogFormat::Json => registry
            .with(file_layer)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Compact => registry
            .with(file_layer)
            .with(fmt::layer().compact().with_writer(io::stderr))
            .init(),
    }

    Ok(())
}
