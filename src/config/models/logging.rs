//! Logging configuration

use serde::{Deserialize, Serialize};

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `routewise=debug,actix_web=warn`
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
    /// Include the event target (module path)
    #[serde(default)]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            with_target: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
