//! Resize configuration.
//!
//! Handles loading and validating an optional TOML config file. Every field
//! has a default, so the file only needs the values it wants to change, and
//! command-line flags override whatever the file says.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! max_dimension = 1024.0    # Bounding box for the longer edge, in pixels
//! suffix = "_resized"       # Inserted between file stem and extension
//! strict_decode = false     # Abort on JPEG pixel-decode errors instead of logging
//!
//! [limits]
//! max_input_bytes = 104857600  # Refuse larger inputs (omit for no limit)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::DecodePolicy;
use crate::naming::SUFFIX_REQUIRED;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resize settings loaded from a config file and/or the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Longest edge allowed in the output, in pixels.
    pub max_dimension: f64,
    /// Text inserted before the extension of the output filename.
    pub suffix: String,
    /// When true, a JPEG whose pixels fail to decode aborts the run.
    pub strict_decode: bool,
    /// Input safety limits.
    pub limits: LimitsConfig,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1024.0,
            suffix: "_resized".to_string(),
            strict_decode: false,
            limits: LimitsConfig::default(),
        }
    }
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_dimension.is_finite() || self.max_dimension <= 0.0 {
            return Err(ConfigError::Validation(
                "max_dimension must be a positive number".into(),
            ));
        }
        if self.suffix.is_empty() {
            return Err(ConfigError::Validation(SUFFIX_REQUIRED.into()));
        }
        if self.limits.max_input_bytes == Some(0) {
            return Err(ConfigError::Validation(
                "limits.max_input_bytes must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        DecodePolicy::from_strict(self.strict_decode)
    }
}

/// Input safety limits.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest accepted source file in bytes. `None` means unlimited.
    pub max_input_bytes: Option<u64>,
}

/// Load config from a TOML file.
///
/// A missing file yields the defaults; a present file is parsed (unknown
/// keys rejected) and validated.
pub fn load_config(path: &Path) -> Result<ResizeConfig, ConfigError> {
    if !path.exists() {
        return Ok(ResizeConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: ResizeConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imgfit configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags win over this file.
# Unknown keys will cause an error.

# Longest edge allowed in the output, in pixels. Images already within
# this bound are copied byte-for-byte instead of being re-encoded.
max_dimension = 1024.0

# Inserted between the file stem and its extension:
#   cat.jpg -> cat_resized.jpg
suffix = "_resized"

# JPEG files whose pixel data is damaged (truncated, corrupt scans) are
# normally logged and processed with whatever pixels could be recovered.
# Set to true to fail instead.
strict_decode = false

[limits]
# Refuse source files larger than this many bytes. No limit when omitted.
# max_input_bytes = 104857600
"##
}
