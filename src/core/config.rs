//! Trim configuration: spacing rules applied when editing the timeline.
//!
//! Loaded from RON, e.g.
//!
//! ```ron
//! (gap_tolerance: 0.25, append_pad: 0.2)
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::time::{self, Time};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Upper bound for either spacing value, in seconds.
pub const MAX_SPACING_SECONDS: f64 = 3600.0;

/// Spacing rules for kept intervals. Values are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    /// Minimum separation between adjacent intervals, and minimum interval length.
    pub gap_tolerance: f64,
    /// Extra padding inserted before an appended interval.
    pub append_pad: f64,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            gap_tolerance: 0.2,
            append_pad: 0.2,
        }
    }
}

impl TrimConfig {
    /// Parse a RON document and validate it.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: TrimConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Reject negative, non-finite or oversized tolerances.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("gap_tolerance", self.gap_tolerance), ("append_pad", self.append_pad)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite, non-negative number of seconds (got {})",
                    name, value
                )));
            }
            if value > MAX_SPACING_SECONDS {
                return Err(ConfigError::Invalid(format!(
                    "{} must not exceed {} seconds (got {})",
                    name, MAX_SPACING_SECONDS, value
                )));
            }
        }
        Ok(())
    }

    /// Gap tolerance in nanoseconds
    pub fn gap(&self) -> Time {
        time::from_seconds(self.gap_tolerance)
    }

    /// Append pad in nanoseconds
    pub fn pad(&self) -> Time {
        time::from_seconds(self.append_pad)
    }
}
