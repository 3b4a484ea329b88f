//! Logger configuration

use super::error::{LoggerError, Result};
use super::style::ColorMode;
use serde::{Deserialize, Serialize};

/// Settings that can be loaded from a host application's config file
///
/// # Examples
///
/// ```
/// use stamp_log::core::{ColorMode, LoggerConfig};
///
/// let config = LoggerConfig::from_json_str(r#"{ "color": "never" }"#).unwrap();
/// assert_eq!(config.color, ColorMode::Never);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub color: ColorMode,
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "empty document"));
        }
        Ok(serde_json::from_str(json)?)
    }
}
