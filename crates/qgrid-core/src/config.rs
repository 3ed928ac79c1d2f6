//! Configuration management for qgrid.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QGRID_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Hard ceiling for `engine.max_wires`; a 32-wire state is 64 GiB.
pub const MAX_WIRES_CEILING: u32 = 32;

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Simulation engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Per-request limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Probe execution settings
    #[serde(default)]
    pub probing: ProbingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulation engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Widest register the engine accepts
    #[serde(default = "default_max_wires")]
    pub max_wires: u32,
}

/// Per-request limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Wall-clock budget for one request in milliseconds; unset means no deadline
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

/// Probe execution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbingConfig {
    /// Simulate prefixes on the rayon pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Share one prefix simulation between markers in the same moment
    #[serde(default = "default_true")]
    pub memoize: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_max_wires() -> u32 {
    24
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_wires: default_max_wires(),
        }
    }
}

impl Default for ProbingConfig {
    fn default() -> Self {
        ProbingConfig {
            parallel: true,
            memoize: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl CoreConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: CoreConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => CoreConfig::default(),
        };

        let config = config.merge_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Merge overrides into this configuration.
    ///
    /// `var` looks up one `QGRID_*` variable. Absent variables leave fields
    /// unchanged, and so do values that fail to parse.
    pub fn merge_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Engine
        if let Some(val) = var("QGRID_MAX_WIRES").and_then(|v| v.parse().ok()) {
            self.engine.max_wires = val;
        }

        // Limits
        if let Some(v) = var("QGRID_DEADLINE_MS") {
            self.limits.deadline_ms = match v.as_str() {
                "" | "none" | "off" => None,
                other => other.parse().ok().or(self.limits.deadline_ms),
            };
        }

        // Probing
        if let Some(val) = var("QGRID_PROBE_PARALLEL").and_then(|v| parse_flag(&v)) {
            self.probing.parallel = val;
        }
        if let Some(val) = var("QGRID_PROBE_MEMOIZE").and_then(|v| parse_flag(&v)) {
            self.probing.memoize = val;
        }

        // Logging
        if let Some(v) = var("QGRID_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = var("QGRID_LOG_FORMAT") {
            self.logging.format = v;
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.max_wires == 0 || self.engine.max_wires > MAX_WIRES_CEILING {
            return Err(ConfigError::ValidationError(format!(
                "max_wires must be between 1 and {MAX_WIRES_CEILING}, got {}",
                self.engine.max_wires
            )));
        }

        if self.limits.deadline_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "deadline_ms must be greater than 0; omit the field to disable the deadline"
                    .to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {other}"
                )));
            }
        }

        Ok(())
    }

    /// The per-request deadline budget, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.limits.deadline_ms.map(Duration::from_millis)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
