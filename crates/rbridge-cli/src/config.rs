//! YAML configuration for the command-line tool.
//!
//! Every key is optional:
//!
//! ```yaml
//! log_level: debug
//! buffer_capacity: 150
//! water_enable_polarity: disable_bits
//! ignored_sensor_types: [unknown, supervisory message, reset message, downlink]
//! ```

use std::fs;
use std::path::Path;

use rbridge_protocol::EnableBitPolarity;
use serde::Deserialize;

use crate::error::{CliError, CliResult};
use crate::logging::LogLevel;

/// Number of ingested messages retained by default.
pub const DEFAULT_BUFFER_CAPACITY: usize = 150;

/// Label fragments that never count as a discovered sensor.
pub const DEFAULT_IGNORED_SENSOR_TYPES: [&str; 4] =
    ["unknown", "supervisory message", "reset message", "downlink"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Log level when neither `--log-level` nor `RUST_LOG` is given.
    pub log_level: Option<LogLevel>,
    /// Ingested messages kept before the oldest is evicted.
    pub buffer_capacity: usize,
    /// Enable-bit convention for water sensor downlinks.
    pub water_enable_polarity: EnableBitPolarity,
    /// Lowercase label fragments excluded from sensor discovery.
    pub ignored_sensor_types: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_level: None,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            water_enable_polarity: EnableBitPolarity::default(),
            ignored_sensor_types: DEFAULT_IGNORED_SENSOR_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CliConfig {
    /// Parse a config from YAML text.
    pub fn from_yaml_str(text: &str) -> CliResult<Self> {
        // An empty file parses as YAML null
        if text.trim().is_empty() {
            return Ok(CliConfig::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let config_error = |message: String| CliError::Config {
            path: path.to_path_buf(),
            message,
        };
        let text = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        Self::from_yaml_str(&text).map_err(|e| config_error(e.to_string()))
    }

    /// Effective log level: the command-line flag wins over the file.
    pub fn log_level_or(&self, flag: Option<LogLevel>) -> LogLevel {
        flag.or(self.log_level).unwrap_or_default()
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(CliConfig::default()),
        }
    }
}
