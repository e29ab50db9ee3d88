//! Tool configuration.
//!
//! Handles loading and validating `upfit.toml`. Config files are sparse —
//! override just the values you want; everything else falls back to stock
//! defaults. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [limits]
//! max_width = 2400          # Maximum output width in pixels
//! max_height = 1800         # Maximum output height in pixels
//!
//! [encoding]
//! quality = 0.8             # First-pass JPEG quality factor, (0, 1]
//!
//! [intake]
//! threshold_bytes = 3145728 # Files at or under this size skip normalization
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! The 3 MiB encode ceiling and the 0.95 fallback quality are fixed policy,
//! not configuration — see [`crate::imaging::SIZE_CEILING_BYTES`].

use crate::imaging::{Bounds, Quality};
use crate::intake::IntakeSettings;
use serde::{Deserialize, Serialize};
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

/// Tool configuration loaded from `upfit.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpfitConfig {
    /// Maximum output dimensions.
    pub limits: LimitsConfig,
    /// Lossy encoding settings.
    pub encoding: EncodingConfig,
    /// Size-threshold gate settings.
    pub intake: IntakeConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl UpfitConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_width == 0 || self.limits.max_height == 0 {
            return Err(ConfigError::Validation(
                "limits.max_width and limits.max_height must be non-zero".into(),
            ));
        }
        if !(self.encoding.quality > 0.0 && self.encoding.quality <= 1.0) {
            return Err(ConfigError::Validation(
                "encoding.quality must be in (0, 1]".into(),
            ));
        }
        if self.intake.threshold_bytes == 0 {
            return Err(ConfigError::Validation(
                "intake.threshold_bytes must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Build the intake gate settings from this config.
    pub fn intake_settings(&self) -> IntakeSettings {
        IntakeSettings {
            threshold_bytes: self.intake.threshold_bytes,
            bounds: Bounds::new(self.limits.max_width, self.limits.max_height),
            quality: Quality::new(self.encoding.quality),
        }
    }
}

/// Maximum output dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let b = Bounds::default();
        Self {
            max_width: b.max_width,
            max_height: b.max_height,
        }
    }
}

/// Lossy encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// First-pass JPEG quality factor, in (0, 1].
    pub quality: f32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
        }
    }
}

/// Size-threshold gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntakeConfig {
    /// Files at or under this byte length are uploaded as-is.
    pub threshold_bytes: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            threshold_bytes: IntakeSettings::default().threshold_bytes,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<UpfitConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: UpfitConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A stock `upfit.toml` with all options documented.
pub fn stock_config_toml() -> String {
    "\
# upfit configuration - all options are optional, defaults shown

[limits]
max_width = 2400          # Maximum output width in pixels
max_height = 1800         # Maximum output height in pixels

[encoding]
quality = 0.8             # First-pass JPEG quality factor, (0, 1]

[intake]
threshold_bytes = 3145728 # Files at or under this size (3 MiB) skip normalization

[processing]
# max_processes = 4       # Max parallel workers (omit for auto = CPU cores)
"
    .to_string()
}
