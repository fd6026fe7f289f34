//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::silkscreen::{SilkscreenOptions, DEFAULT_LINE_WIDTH, DEFAULT_MAX_ITERATIONS};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Directories footprint files may be read from.
    #[serde(default)]
    pub allowed_paths: Vec<PathBuf>,

    /// Expansion loop settings.
    #[serde(default)]
    pub expansion: ExpansionConfig,

    /// Style settings.
    #[serde(default)]
    pub style: StyleConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expansion.max_iterations == 0 {
            return Err(ConfigError::ValidationError {
                message: "expansion.max_iterations must be at least 1".to_string(),
            });
        }

        let width = self.style.silkscreen_line_width;
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "style.silkscreen_line_width must be a positive number, got {width}"
                ),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Generation options derived from this configuration.
    #[must_use]
    pub const fn silkscreen_options(&self) -> SilkscreenOptions {
        SilkscreenOptions {
            max_iterations: self.expansion.max_iterations,
            line_width: self.style.silkscreen_line_width,
        }
    }
}

/// Expansion loop configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpansionConfig {
    /// Cap on expansion plus repair steps per footprint.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

const fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

/// Style configuration for generated silkscreen.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Silkscreen line width in mm.
    #[serde(default = "default_silkscreen_width")]
    pub silkscreen_line_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            silkscreen_line_width: default_silkscreen_width(),
        }
    }
}

const fn default_silkscreen_width() -> f64 {
    DEFAULT_LINE_WIDTH
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
